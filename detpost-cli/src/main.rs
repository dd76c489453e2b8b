use clap::Parser;
use detpost::{AspectRatioRange, BoundingBox, Detector, DetectorConfig, DetectorKind, Outcome};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Detection post-processing CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LayoutJson {
    num_predictions: Option<usize>,
    num_channels: Option<usize>,
    num_classes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PipelineJson {
    objectness_threshold: Option<f32>,
    confidence_threshold: Option<f32>,
    min_box_area: Option<f32>,
    iou_threshold: Option<f32>,
    min_aspect_ratio: Option<f32>,
    max_aspect_ratio: Option<f32>,
    parallel: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    detector: String,
    tensor_path: String,
    labels_path: Option<String>,
    inference_ms: u64,
    output_path: Option<String>,
    layout: LayoutJson,
    pipeline: PipelineJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorKind::Object.tag().to_owned(),
            tensor_path: String::new(),
            labels_path: None,
            inference_ms: 0,
            output_path: None,
            layout: LayoutJson::default(),
            pipeline: PipelineJson::default(),
        }
    }
}

impl Config {
    /// Applies the JSON overrides on top of the kind's defaults.
    fn detector_config(
        &self,
        kind: DetectorKind,
    ) -> Result<DetectorConfig, Box<dyn std::error::Error>> {
        let mut cfg = DetectorConfig::for_kind(kind);
        if let Some(path) = &self.labels_path {
            cfg.label_path = Some(PathBuf::from(path));
        }

        let layout = &self.layout;
        cfg.layout.num_predictions = layout.num_predictions.unwrap_or(cfg.layout.num_predictions);
        cfg.layout.num_channels = layout.num_channels.unwrap_or(cfg.layout.num_channels);
        cfg.layout.num_classes = layout.num_classes.unwrap_or(cfg.layout.num_classes);

        let p = &self.pipeline;
        let params = &mut cfg.params;
        params.decode.objectness_threshold = p
            .objectness_threshold
            .unwrap_or(params.decode.objectness_threshold);
        params.decode.confidence_threshold = p
            .confidence_threshold
            .unwrap_or(params.decode.confidence_threshold);
        params.decode.min_box_area = p.min_box_area.unwrap_or(params.decode.min_box_area);
        params.iou_threshold = p.iou_threshold.unwrap_or(params.iou_threshold);
        params.parallel = p.parallel.unwrap_or(params.parallel);
        if p.min_aspect_ratio.is_some() || p.max_aspect_ratio.is_some() {
            params.aspect_ratio = AspectRatioRange::new(
                p.min_aspect_ratio.unwrap_or(f32::NEG_INFINITY),
                p.max_aspect_ratio.unwrap_or(f32::INFINITY),
            )?;
        }
        Ok(cfg)
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    confidence: f32,
    class_id: usize,
    class_name: String,
}

impl From<BoundingBox> for DetectionRecord {
    fn from(value: BoundingBox) -> Self {
        Self {
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
            confidence: value.confidence,
            class_id: value.class_id,
            class_name: value.class_name,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    detector: &'static str,
    inference_ms: u64,
    detections: Vec<DetectionRecord>,
}

/// Reads a raw little-endian `f32` tensor dump.
fn load_tensor(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "{}: length {} is not a multiple of 4 bytes",
            path.display(),
            bytes.len()
        )
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("detpost=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }

    let kind: DetectorKind = config.detector.parse()?;
    let mut detector = Detector::load(config.detector_config(kind)?)?;
    detector.enable();

    let tensor = load_tensor(Path::new(&config.tensor_path))?;
    let inference_time = Duration::from_millis(config.inference_ms);
    let detections = match detector.detect(&tensor, inference_time)? {
        Some(Outcome::Detected { boxes, .. }) => {
            boxes.into_iter().map(DetectionRecord::from).collect()
        }
        Some(Outcome::Empty) | None => Vec::new(),
    };
    tracing::info!(count = detections.len(), "detections");

    let output = Output {
        detector: kind.tag(),
        inference_ms: config.inference_ms,
        detections,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
