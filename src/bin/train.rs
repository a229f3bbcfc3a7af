use clap::Parser;
use doclayout_launch::{run_train, TrainArgs};

fn main() -> anyhow::Result<()> {
    let args = TrainArgs::parse();
    run_train(args)
}
