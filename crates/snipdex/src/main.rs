fn main() {
    snipdex_cli::run_main();
}
