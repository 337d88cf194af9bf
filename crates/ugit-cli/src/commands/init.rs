use anyhow::Result;
use clap::Args;

use ugit_repository::Repository;

#[derive(Args)]
pub struct InitArgs {}

pub fn run(_args: &InitArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let existed = Repository::exists(&cwd);
    let repo = Repository::init(&cwd)?;

    if existed {
        println!(
            "Reinitialized existing ugit repository in {}",
            repo.ugit_dir().display()
        );
    } else {
        println!(
            "Initialized empty ugit repository in {}",
            repo.ugit_dir().display()
        );
    }
    Ok(0)
}
