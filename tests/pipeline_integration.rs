//! Integration tests for the cleaning pipeline
//!
//! These tests exercise end-to-end runs over real files: extract, the
//! default cleaning chain, and load.

use dataprov::dataset::{Schema, columns};
use dataprov::error::Error;
use dataprov::etl::{Extractor, Pipeline};
use dataprov::storage::{CsvReader, CsvWriter};
use dataprov::transform::TransformChain;
use eyre::Result;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "UF;Município;Preço unitário;Quantidade comprada;Taxa de entrega;Valor total pago;CPF do cliente;Nome do cliente";

fn write_input(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("compras.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_cleaning_run() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_input(
        &dir,
        &[
            // Wrong UF, stale total, keeps its row
            "XX;Fortaleza;10.00;3;2.50;99.99;111.444.777-35;Maria Souza",
            // Missing customer id, dropped
            "RJ;Rio de Janeiro;5.00;2;1.00;11.00;;José Lima",
            // Missing customer name, dropped
            "SP;São Paulo;8.00;1;0.00;8.00;222.555.888-46;",
        ],
    );
    let output = dir.path().join("tratado.csv");

    let pipeline = Pipeline::new(
        CsvReader::new(&input).with_schema(Schema::purchases()),
        TransformChain::default_cleaning(),
        CsvWriter::new(&output),
    );
    let count = pipeline.run()?;
    assert_eq!(count, 1);

    let cleaned = CsvReader::new(&output).extract()?;
    assert_eq!(cleaned.shape(), (1, 8));
    assert_eq!(cleaned.value(0, columns::LOCALITY_CODE), Some("CE"));
    assert_eq!(cleaned.value(0, columns::TOTAL_PAID), Some("32.50"));
    assert_eq!(cleaned.value(0, columns::CUSTOMER_NAME), Some("Maria Souza"));
    Ok(())
}

#[test]
fn test_unknown_locality_keeps_existing_code() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_input(
        &dir,
        &["MG;Belo Horizonte;4.00;2;1.50;9.50;333.666.999-57;Ana Reis"],
    );
    let output = dir.path().join("tratado.csv");

    let pipeline = Pipeline::new(
        CsvReader::new(&input).with_schema(Schema::purchases()),
        TransformChain::default_cleaning(),
        CsvWriter::new(&output),
    );
    pipeline.run()?;

    let cleaned = CsvReader::new(&output).extract()?;
    assert_eq!(cleaned.value(0, columns::LOCALITY_CODE), Some("MG"));
    assert_eq!(cleaned.value(0, columns::TOTAL_PAID), Some("9.50"));
    Ok(())
}

#[test]
fn test_write_then_read_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_input(
        &dir,
        &[
            "CE;Fortaleza;10.00;3;2.50;32.50;111.444.777-35;Maria Souza",
            "RJ;Rio de Janeiro;5.00;2;1.00;11.00;444.777.000-68;João Alves",
        ],
    );
    let output = dir.path().join("copy.csv");

    let dataset = CsvReader::new(&input).extract()?;
    CsvWriter::new(&output).write(&dataset)?;
    let reread = CsvReader::new(&output).extract()?;

    assert_eq!(reread.headers(), dataset.headers());
    assert_eq!(reread.shape(), dataset.shape());
    for (row, expected) in reread.rows().iter().zip(dataset.rows()) {
        assert_eq!(row.fields(), expected.fields());
    }
    Ok(())
}

#[test]
fn test_missing_input_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let result = CsvReader::new(dir.path().join("nope.csv")).extract();
    assert!(matches!(result, Err(Error::InputNotFound { .. })));
}

#[test]
fn test_missing_column_reports_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.csv");
    fs::write(&path, "UF;Município\nCE;Fortaleza\n").unwrap();

    let result = CsvReader::new(&path)
        .with_schema(Schema::purchases())
        .extract();
    assert!(matches!(result, Err(Error::InputMalformed(_))));
}

#[test]
fn test_unparseable_numeric_reports_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    let mut content = String::from(HEADER);
    content.push_str("\nCE;Fortaleza;dez;3;2.50;0;111.444.777-35;Maria\n");
    fs::write(&path, content).unwrap();

    let result = CsvReader::new(&path)
        .with_schema(Schema::purchases())
        .extract();
    assert!(matches!(result, Err(Error::InputMalformed(_))));
}
