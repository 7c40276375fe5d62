//! Built-in scan presets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::template::{
    ENERGY_SCAN_ADDBACK_TEMPLATE, ENERGY_SCAN_TEMPLATE, POSITION_SCAN_TEMPLATE,
};
use crate::domain::errors::DomainError;
use crate::domain::model::RangeSpec;

pub const ENERGY_SCAN: &str = "energy-scan";
pub const POSITION_SCAN: &str = "position-scan";
pub const ENERGY_SCAN_ADDBACK: &str = "energy-scan-addback";

/// keV indices rendered as MeV.
const KEV_PER_MEV: i64 = 1000;
const POSITION_SCAN_STEPS: i64 = 325;

/// A named set of ranges rendered with one template into one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPreset {
    pub name: String,
    pub output: PathBuf,
    pub template: String,
    pub ranges: Vec<RangeSpec>,
}

impl ScanPreset {
    /// Total number of lines the preset produces.
    pub fn line_count(&self) -> usize {
        self.ranges.iter().map(RangeSpec::line_count).sum()
    }
}

/// Energy sweep from 20 keV to 15 MeV, denser at low energies.
fn energy_ranges() -> Result<Vec<RangeSpec>, DomainError> {
    Ok(vec![
        RangeSpec::new(20, 300, 10, KEV_PER_MEV)?,
        RangeSpec::new(300, 2000, 100, KEV_PER_MEV)?,
        RangeSpec::new(2000, 16000, 1000, KEV_PER_MEV)?,
    ])
}

/// The three scans shipped with the tool, in a fixed order.
pub fn builtin_presets() -> Result<Vec<ScanPreset>, DomainError> {
    Ok(vec![
        ScanPreset {
            name: ENERGY_SCAN.to_owned(),
            output: PathBuf::from("generatedFileNamesEnergyScan.txt"),
            template: ENERGY_SCAN_TEMPLATE.to_owned(),
            ranges: energy_ranges()?,
        },
        ScanPreset {
            name: POSITION_SCAN.to_owned(),
            output: PathBuf::from("generatedFileNamesPositionScan.txt"),
            template: POSITION_SCAN_TEMPLATE.to_owned(),
            ranges: vec![RangeSpec::new(0, POSITION_SCAN_STEPS, 1, 1)?],
        },
        ScanPreset {
            name: ENERGY_SCAN_ADDBACK.to_owned(),
            output: PathBuf::from("generatedFileNamesEnergyScanAddBack.txt"),
            template: ENERGY_SCAN_ADDBACK_TEMPLATE.to_owned(),
            ranges: energy_ranges()?,
        },
    ])
}
