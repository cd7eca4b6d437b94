//! List the targets of a makefile, or print the `make` invocation for one.

#[macro_use]
extern crate log;

use failure::{bail, format_err, Error};
use getopts::Options;
use mktargets::{detect, Makefile};
use std::path::PathBuf;

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} [options] [MAKEFILE...]", program);
    print!("{}", opts.usage(&brief));
}

fn print_targets(makefile: &Makefile) {
    for target in makefile.targets() {
        println!("{}", target.name());
        if !target.dependencies().is_empty() {
            println!("  depends on: {}", target.dependencies().join(" "));
        }
        if target.has_variables() {
            let mut needs = Vec::new();
            for name in target.required_variables() {
                match makefile.variables().get(name) {
                    Some(value) => needs.push(format!("{} (default {:?})", name, value)),
                    None => needs.push(name.clone()),
                }
            }
            println!("  variables: {}", needs.join(", "));
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let args: Vec<_> = std::env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("C", "", "Directory to look for a makefile in", "DIRECTORY");
    opts.optopt("t", "target", "Print the make invocation for TARGET", "TARGET");
    opts.optmulti("D", "define", "Set a variable for the invocation", "NAME=VALUE");
    opts.optflag("h", "help", "Print this help");

    let matches = opts.parse(&args[1..])?;
    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return Ok(());
    }

    let dir = matches
        .opt_str("C")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // Makefiles named on the command line are relative to -C, like make's
    let mut files: Vec<PathBuf> = matches.free.iter().map(|f| dir.join(f)).collect();
    if files.is_empty() {
        match detect::find_makefile(&dir)? {
            Some(path) => files.push(path),
            None => bail!("no makefile found in {}", dir.display()),
        }
    }

    for path in files.iter() {
        info!("Listing targets of {:?}", path);
        let makefile = Makefile::from_file(path)?;

        if makefile.targets().is_empty() {
            warn!("No targets found in {}", path.display());
        }

        match matches.opt_str("t") {
            Some(target) => {
                let mut invocation = makefile.invocation(&target)?;
                for define in matches.opt_strs("D") {
                    let mut parts = define.splitn(2, '=');
                    match (parts.next(), parts.next()) {
                        (Some(name), Some(value)) if !name.is_empty() => {
                            invocation.set(name, value);
                        }
                        _ => return Err(format_err!("expected NAME=VALUE, got {:?}", define)),
                    }
                }
                println!("{}", invocation);
            }
            None => print_targets(&makefile),
        }
    }

    Ok(())
}
