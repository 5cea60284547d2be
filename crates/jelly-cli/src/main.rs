fn main() {
    jelly_cli::run_main();
}
