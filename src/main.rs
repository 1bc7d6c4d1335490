use anyhow::Result;

fn main() -> Result<()> {
    lernplan::cli::run()
}
