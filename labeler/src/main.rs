use argh::FromArgs;
use std::path::PathBuf;

use precip_labeler::{
    add_precip_label_with_summary, gaussian_cloud, read_table, write_table, LabelerConfig,
};

#[derive(FromArgs)]
/// Label precipitation returns in a LiDAR point table
struct Args {
    /// path to a text table with rows `timestamp x y z intensity ...`
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// path to write the labeled table to
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// path to a JSON labeler config
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// number of Gaussian points to label when no input is given (default: 2000)
    #[argh(option, default = "2000")]
    synthetic: usize,

    /// seed of the synthetic cloud (default: 0)
    #[argh(option, default = "0")]
    seed: u64,

    /// points farther than this from the origin are precipitation
    #[argh(option)]
    th_d: Option<f64>,

    /// neighbors per point for the feature pass
    #[argh(option, short = 'k')]
    k: Option<usize>,

    /// show a progress bar over the feature pass
    #[argh(switch, short = 'p')]
    progress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => LabelerConfig::from_json_file(path)?,
        None => LabelerConfig::default(),
    };
    if args.th_d.is_some() {
        config.th_d = args.th_d;
    }
    if let Some(k) = args.k {
        config.k = k;
    }
    config.print_progress |= args.progress;

    let table = match &args.input {
        Some(path) => read_table(path)?,
        None => gaussian_cloud(args.synthetic, args.seed),
    };
    log::info!("read {} points of {} columns", table.height(), table.width());

    let (labeled, summary) = add_precip_label_with_summary(&table, &config)?;

    if let Some(path) = &args.output {
        write_table(&labeled, path)?;
    }

    println!("Total points: {}", summary.total);
    println!("Outliers (precipitation): {}", summary.precipitation);
    println!("Inliers: {}", summary.valid);

    Ok(())
}
