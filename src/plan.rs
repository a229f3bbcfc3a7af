//! Model-source resolution and run naming for a training launch.

use std::fmt;

use thiserror::Error;

use crate::util::TrainArgs;

/// Which pretrained-weight source a run starts from. The tag is embedded in
/// the run name so run-bookkeeping scripts can recover it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    None,
    Coco,
    BestfitLayout,
    Unknown,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::None => "None",
            Provenance::Coco => "coco",
            Provenance::BestfitLayout => "bestfit_layout",
            Provenance::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unsupported pretrain specifier: {0:?}")]
    UnsupportedPretrain(String),
}

/// Where the base model comes from: a fresh architecture file, the published
/// COCO weights for the variant, or an explicit checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Fresh(String),
    PretrainedCoco(String),
    PretrainedCheckpoint { path: String, provenance: Provenance },
}

impl ModelSource {
    /// Resolve the source from the variant letter and the optional
    /// `--pretrain` value. "coco" selects the stock weights; a value
    /// containing "pt" is taken as a checkpoint path; anything else is
    /// rejected.
    pub fn resolve(variant: &str, pretrain: Option<&str>) -> Result<Self, ResolveError> {
        match pretrain {
            None => Ok(ModelSource::Fresh(variant.to_string())),
            Some("coco") => Ok(ModelSource::PretrainedCoco(variant.to_string())),
            Some(value) if value.contains("pt") => {
                let provenance = if value.contains("bestfit") {
                    Provenance::BestfitLayout
                } else {
                    Provenance::Unknown
                };
                Ok(ModelSource::PretrainedCheckpoint {
                    path: value.to_string(),
                    provenance,
                })
            }
            Some(other) => Err(ResolveError::UnsupportedPretrain(other.to_string())),
        }
    }

    /// Identifier handed to the trainer: an architecture file for fresh runs,
    /// the stock weights file for COCO runs, the checkpoint path verbatim
    /// otherwise.
    pub fn identifier(&self) -> String {
        match self {
            ModelSource::Fresh(variant) => format!("yolov10{variant}.yaml"),
            ModelSource::PretrainedCoco(variant) => format!("yolov10{variant}.pt"),
            ModelSource::PretrainedCheckpoint { path, .. } => path.clone(),
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            ModelSource::Fresh(_) => Provenance::None,
            ModelSource::PretrainedCoco(_) => Provenance::Coco,
            ModelSource::PretrainedCheckpoint { provenance, .. } => *provenance,
        }
    }
}

/// Run directory name. Field order and separators are load-bearing: existing
/// run-parsing scripts split on them.
pub fn run_name(
    variant: &str,
    data: &str,
    epoch: usize,
    image_size: usize,
    batch_size: usize,
    provenance: Provenance,
) -> String {
    format!(
        "yolov10{variant}_{data}_epoch{epoch}_imgsz{image_size}_bs{batch_size}_pretrain_{provenance}"
    )
}

/// Everything derived from the raw arguments before the trainer is invoked.
#[derive(Debug, Clone)]
pub struct TrainPlan {
    /// Model identifier the trainer is constructed from.
    pub model: String,
    pub provenance: Provenance,
    pub run_name: String,
    /// Dataset config file name (`<data>.yaml`).
    pub data_config: String,
    pub val: bool,
    pub plots: bool,
}

impl TrainPlan {
    pub fn resolve(args: &TrainArgs) -> Result<Self, ResolveError> {
        let source = ModelSource::resolve(&args.model, args.pretrain.as_deref())?;
        let provenance = source.provenance();
        Ok(TrainPlan {
            model: source.identifier(),
            provenance,
            run_name: run_name(
                &args.model,
                &args.data,
                args.epoch,
                args.image_size,
                args.batch_size,
                provenance,
            ),
            data_config: format!("{}.yaml", args.data),
            // The only type normalization in the launcher: the legacy surface
            // takes these as integers, the trainer wants booleans.
            val: args.val != 0,
            plots: args.plot != 0,
        })
    }
}
