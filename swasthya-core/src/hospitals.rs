//! Hospital directory with fixed status records

use serde::{Deserialize, Serialize};

/// Hospital load classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HospitalLoad {
    Normal,
    Moderate,
    Critical,
}

impl HospitalLoad {
    pub fn as_str(&self) -> &'static str {
        match self {
            HospitalLoad::Normal => "NORMAL",
            HospitalLoad::Moderate => "MODERATE",
            HospitalLoad::Critical => "CRITICAL",
        }
    }
}

/// Bed status of a single hospital
///
/// Wire names are `totalBeds` and `availableBeds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalStatus {
    pub name: String,
    pub status: HospitalLoad,
    pub total_beds: u32,
    pub available_beds: u32,
}

impl HospitalStatus {
    pub fn new(name: &str, status: HospitalLoad, total_beds: u32, available_beds: u32) -> Self {
        HospitalStatus {
            name: name.to_string(),
            status,
            total_beds,
            available_beds,
        }
    }

    /// Beds in use
    pub fn occupied_beds(&self) -> u32 {
        self.total_beds.saturating_sub(self.available_beds)
    }

    /// Occupied share of beds, rounded to the nearest whole percent
    pub fn occupancy_percent(&self) -> u32 {
        if self.total_beds == 0 {
            return 0;
        }
        let occupied = u64::from(self.occupied_beds());
        let total = u64::from(self.total_beds);
        // Round half up
        ((occupied * 200 + total) / (total * 2)) as u32
    }
}

/// Fixed directory of hospitals
#[derive(Debug, Clone, Copy, Default)]
pub struct HospitalDirectory;

impl HospitalDirectory {
    pub fn new() -> Self {
        HospitalDirectory
    }

    /// All hospitals, in directory order
    pub fn list(&self) -> Vec<HospitalStatus> {
        vec![
            HospitalStatus::new("AIIMS Delhi", HospitalLoad::Moderate, 100, 35),
            HospitalStatus::new("Apollo Hospital", HospitalLoad::Normal, 120, 55),
            HospitalStatus::new("Max Healthcare", HospitalLoad::Critical, 80, 8),
        ]
    }
}
