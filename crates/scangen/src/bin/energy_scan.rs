use scangen::app::presets::ENERGY_SCAN;

fn main() -> anyhow::Result<()> {
    scangen::init();
    scangen::run_builtin(ENERGY_SCAN)
}
