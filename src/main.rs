fn main() -> anyhow::Result<()> {
    syslog_matcher::run()
}
