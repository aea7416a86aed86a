use zenfetch_lib::cli::{parse_args, resolve_command, run_fetch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_command(args.command)?;
    run_fetch(params).await?;

    Ok(())
}
