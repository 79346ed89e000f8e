use structopt::StructOpt;

use snvstat::cli::{run, Harness};

fn main() {
    let harness = Harness::from_args();

    fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply()
        .expect("failed to initialize logger");

    let p_values = run(&harness);
    println!(
        "prob from snpcaller(): (.. -2:{} .. -1:{} ..) {}",
        p_values[2], p_values[1], p_values[0]
    );
}
