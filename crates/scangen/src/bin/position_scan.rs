use scangen::app::presets::POSITION_SCAN;

fn main() -> anyhow::Result<()> {
    scangen::init();
    scangen::run_builtin(POSITION_SCAN)
}
