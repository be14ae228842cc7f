fn main() -> std::io::Result<()> {
    carecase_lib::run()
}
