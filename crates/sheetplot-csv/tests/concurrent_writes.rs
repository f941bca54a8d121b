//! Many threads writing through the shared writer

use std::thread;

use pretty_assertions::assert_eq;
use sheetplot_csv::CsvDocumentWriter;

#[test]
fn shared_writer_keeps_documents_separate() {
    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                let heading = format!("Region {}", i);
                let rows: Vec<Vec<String>> = (0..50)
                    .map(|r| vec![heading.clone(), r.to_string()])
                    .collect();
                let bytes = CsvDocumentWriter::shared().write_document(&rows).unwrap();
                (heading, String::from_utf8(bytes).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (heading, text) = handle.join().unwrap();
        let lines: Vec<&str> = text.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 50);
        for (r, line) in lines.iter().enumerate() {
            assert_eq!(*line, format!("{},{}", heading, r));
        }
    }
}
