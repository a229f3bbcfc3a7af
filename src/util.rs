use std::path::PathBuf;

use clap::Parser;

use crate::config::LaunchConfig;
use crate::plan::TrainPlan;
use crate::trainer;

#[derive(Parser, Debug)]
#[command(
    name = "train",
    about = "Launch a DocLayout YOLOv10 training run via the external trainer"
)]
pub struct TrainArgs {
    /// Dataset name; the trainer receives `<data>.yaml`.
    #[arg(long)]
    pub data: String,
    /// Model variant letter substituted into the yolov10 architecture name.
    #[arg(long)]
    pub model: String,
    /// Number of training epochs.
    #[arg(long)]
    pub epoch: usize,
    /// Optimizer name, or "auto" to let the trainer pick.
    #[arg(long, default_value = "auto")]
    pub optimizer: String,
    /// Optimizer momentum.
    #[arg(long, default_value_t = 0.9, allow_negative_numbers = true)]
    pub momentum: f32,
    /// Initial learning rate.
    #[arg(long, default_value_t = 0.02, allow_negative_numbers = true)]
    pub lr0: f32,
    /// Warmup epochs (fractions allowed).
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub warmup_epochs: f32,
    /// Batch size.
    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,
    /// Square training image size in pixels.
    #[arg(long)]
    pub image_size: usize,
    /// Image mosaic (probability).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mosaic: f32,
    /// Image HSV-Hue augmentation (fraction).
    #[arg(long = "hsv_h", default_value_t = 0.015, allow_negative_numbers = true)]
    pub hsv_h: f32,
    /// Image HSV-Saturation augmentation (fraction).
    #[arg(long = "hsv_s", default_value_t = 0.2, allow_negative_numbers = true)]
    pub hsv_s: f32,
    /// Image HSV-Value augmentation (fraction).
    #[arg(long = "hsv_v", default_value_t = 0.2, allow_negative_numbers = true)]
    pub hsv_v: f32,
    /// Image rotation (+/- deg).
    #[arg(long, default_value_t = 180.0, allow_negative_numbers = true)]
    pub degrees: f32,
    /// Image translation (+/- fraction).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub translate: f32,
    /// Image scale (+/- gain).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub scale: f32,
    /// Image shear (+/- deg).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub shear: f32,
    /// Image perspective (+/- fraction), range 0-0.001.
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub perspective: f32,
    /// Image flip up-down (probability).
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    pub flipud: f32,
    /// Image flip left-right (probability).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub fliplr: f32,
    /// Image channel BGR (probability).
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub bgr: f32,
    /// Image mixup (probability).
    #[arg(long, default_value_t = 0.4, allow_negative_numbers = true)]
    pub mixup: f32,
    /// Segment copy-paste (probability).
    #[arg(long = "copy_paste", default_value_t = 0.0, allow_negative_numbers = true)]
    pub copy_paste: f32,
    /// AutoAugment policy (randaugment, autoaugment, augmix).
    #[arg(long = "auto_augment", default_value = "randaugment")]
    pub auto_augment: String,
    /// Random erasing during classification training (probability).
    #[arg(long, default_value_t = 0.4, allow_negative_numbers = true)]
    pub erasing: f32,
    /// Image crop fraction for classification training.
    #[arg(long = "crop_fraction", default_value_t = 0.1, allow_negative_numbers = true)]
    pub crop_fraction: f32,
    /// Segmentation overlap mask.
    #[arg(long = "overlap_mask", default_value_t = false)]
    pub overlap_mask: bool,
    /// Base weights: "coco" for the stock variant weights, or a checkpoint
    /// path containing "pt". Fresh architecture when omitted.
    #[arg(long)]
    pub pretrain: Option<String>,
    /// Whether to validate during training (nonzero = yes).
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub val: i64,
    /// Epochs between validation passes.
    #[arg(long, default_value_t = 1)]
    pub val_period: usize,
    /// Whether to plot training curves (nonzero = yes).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub plot: i64,
    /// Output project directory for run artifacts.
    #[arg(long)]
    pub project: PathBuf,
    /// Resume the run the trainer finds under the run name.
    #[arg(long, default_value_t = false)]
    pub resume: bool,
    /// Data loader workers.
    #[arg(long, default_value_t = 4)]
    pub workers: usize,
    /// Device list handed through to the trainer.
    #[arg(long, default_value = "0,1,2,3,4,5,6,7")]
    pub device: String,
    /// Epochs between checkpoint saves.
    #[arg(long, default_value_t = 10)]
    pub save_period: usize,
    /// Early-stopping patience in epochs.
    #[arg(long, default_value_t = 100)]
    pub patience: usize,
    /// Print the trainer invocation instead of running it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Resolve the model source and run name, then hand everything to the
/// external trainer exactly once.
pub fn run_train(args: TrainArgs) -> anyhow::Result<()> {
    let cfg = LaunchConfig::load();
    let plan = TrainPlan::resolve(&args)?;

    println!("--- Training Configuration ---");
    println!("{args:?}");
    println!("--------------------------");
    println!("model: {} (pretrain: {})", plan.model, plan.provenance);
    println!("run name: {}", plan.run_name);

    if args.dry_run {
        println!("{}", trainer::command_line(&cfg, &args, &plan));
        return Ok(());
    }
    trainer::launch(&cfg, &args, &plan)
}
