fn main() {
    vhost::app::cli::run();
}
