use anyhow::Result;

fn main() -> Result<()> {
    ttl2jsonld_cli::run()
}
