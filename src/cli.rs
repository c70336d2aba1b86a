//! CLI helper functions

use crate::{
    client::GeminiClient,
    dataset::Schema,
    error::Error,
    etl::{Extractor, Loader, Pipeline, Transformer},
    instrument::instrument_source,
    provenance::{
        EntitySource, FileArtifact, GraphSerializer, NodeId, ProvenanceGraph, ScalarValue,
    },
    storage::{CsvReader, CsvWriter},
    transform::{LocalityCodeFixer, RequiredFieldFilter, TotalRecalculator, TransformChain},
};
use eyre::{Context, Result};
use std::path::Path;

/// Load Gemini client from environment variables
///
/// Expected environment variables:
/// - GEMINI_API_KEY: API key for the Generative Language API (required)
/// - GEMINI_MODEL: Model override (optional)
pub fn load_gemini_client() -> Result<GeminiClient> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| Error::ConfigMissing("GEMINI_API_KEY environment variable not set".into()))?;
    let model = std::env::var("GEMINI_MODEL").ok();
    let client = GeminiClient::try_new(api_key, model)?;
    Ok(client)
}

/// Run the cleaning pipeline with provenance capture
///
/// Pipeline: CsvReader → TransformChain → CsvWriter, each phase recorded as
/// an activity on the provenance graph. If a phase fails, the partial graph
/// is still serialized before the error is reported.
pub fn run_pipeline(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    provenance_path: impl AsRef<Path>,
    serializer: &dyn GraphSerializer,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();
    let provenance_path = provenance_path.as_ref();

    let mut graph = ProvenanceGraph::begin_run("etl_script");
    let input_file = graph.entity("input_file", FileArtifact::new(input).attributes());

    match run_phases(&mut graph, input_file, input, output) {
        Ok(records) => {
            graph.finish_run(serializer, provenance_path)?;
            log::info!("✓ Cleaned {} record(s) to {}", records, output.display());
            Ok(())
        }
        Err(e) => {
            log::warn!("Pipeline failed, saving partial provenance: {}", e);
            if let Err(save_err) = graph.finish_run(serializer, provenance_path) {
                log::warn!("Failed to save partial provenance: {}", save_err);
            }
            Err(e).context("Pipeline run failed")
        }
    }
}

fn run_phases(
    graph: &mut ProvenanceGraph,
    input_file: NodeId,
    input: &Path,
    output: &Path,
) -> crate::error::Result<usize> {
    let reader = CsvReader::new(input).with_schema(Schema::purchases());
    log::info!("Extracting records from {}", input.display());
    let (raw, raw_id) =
        graph.record_phase("extract", &[input_file], "raw_dataset", || reader.extract())?;

    let rules = graph.entity(
        "transformation_rules",
        vec![
            (
                "corrections".to_string(),
                LocalityCodeFixer::default_corrections()
                    .corrections_string()
                    .into(),
            ),
            (
                "total_formula".to_string(),
                TotalRecalculator::new().formula_string().into(),
            ),
            (
                "filters".to_string(),
                ScalarValue::from_list(vec![
                    RequiredFieldFilter::customer_id().rule_string(),
                    RequiredFieldFilter::customer_name().rule_string(),
                ]),
            ),
        ],
    );

    let chain = TransformChain::default_cleaning();
    log::info!("Transforming: {}", chain.step_names().join(" → "));
    let (clean, clean_id) = graph.record_phase(
        "transform",
        &[raw_id, rules],
        "clean_dataset",
        || chain.transform(raw),
    )?;

    let writer = CsvWriter::new(output);
    let (artifact, _) = graph.record_phase("load", &[clean_id], "output_file", || {
        let count = writer.load(clean)?;
        Ok(FileArtifact::written(output, count))
    })?;

    Ok(artifact.records_written.unwrap_or_default())
}

/// Run the cleaning pipeline without provenance capture
///
/// Pipeline: CsvReader → TransformChain → CsvWriter
pub fn run_pipeline_plain(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    let pipeline = Pipeline::new(
        CsvReader::new(input).with_schema(Schema::purchases()),
        TransformChain::default_cleaning(),
        CsvWriter::new(output),
    );
    let count = pipeline.run().context("Pipeline run failed")?;

    log::info!("✓ Cleaned {} record(s) to {}", count, output.display());
    Ok(count)
}

/// Instrument one source file through the Gemini API
///
/// Reads the input script, asks the model for provenance instrumentation,
/// post-processes and validates the response, then writes the output file.
pub async fn instrument_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(Error::InputNotFound {
            path: input.to_path_buf(),
        }
        .into());
    }
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let client = load_gemini_client()?;
    log::info!(
        "Instrumenting {} with model '{}'...",
        input.display(),
        client.model()
    );
    let instrumented = instrument_source(&client, &source).await?;

    std::fs::write(output, instrumented).map_err(|e| Error::WriteFailed {
        path: output.to_path_buf(),
        source: e,
    })?;

    log::info!("✓ Instrumented code saved to {}", output.display());
    Ok(())
}

/// List models that support content generation
pub async fn list_models() -> Result<()> {
    let client = load_gemini_client()?;
    let models = client.list_models().await?;

    if models.is_empty() {
        log::warn!("No models supporting generateContent were found");
        return Ok(());
    }

    for model in &models {
        if model.display_name.is_empty() {
            println!("{}", model.name);
        } else {
            println!("{} ({})", model.name, model.display_name);
        }
    }
    log::info!("✓ Listed {} model(s)", models.len());
    Ok(())
}
