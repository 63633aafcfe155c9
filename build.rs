// Generates the man page and shell completions from the CLI definition.
// Artifacts land in OUT_DIR; packaging picks them up from there.

use clap::CommandFactory;
use clap_complete::shells::{Bash, Fish, Zsh};

include!("src/cli.rs");

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = match std::env::var_os("OUT_DIR") {
        Some(dir) => std::path::PathBuf::from(dir),
        None => return Ok(()),
    };

    let mut cmd = Cli::command();

    let man = clap_mangen::Man::new(cmd.clone());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    std::fs::write(out_dir.join("borgdrone.1"), buffer)?;

    clap_complete::generate_to(Bash, &mut cmd, "borgdrone", &out_dir)?;
    clap_complete::generate_to(Zsh, &mut cmd, "borgdrone", &out_dir)?;
    clap_complete::generate_to(Fish, &mut cmd, "borgdrone", &out_dir)?;

    Ok(())
}
