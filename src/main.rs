fn main() -> color_eyre::Result<()> {
    kvpeek::run_cli()
}
