//! Alignment marker extraction and checking.
//!
//! Sources under test place labels named `SHOULD_ALIGN_<N>_HERE` where the
//! following instruction must start on an `N`-byte boundary. `objdump -d`
//! prints each label as `<hex-address> <LABEL>:`, so the disassembly text is
//! enough to verify the layout the linker chose.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{HarnessError, Result};

static MARKER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn marker_pattern() -> &'static Regex {
    MARKER_PATTERN.get_or_init(|| {
        Regex::new(r"([0-9a-fA-F]+)\s+<SHOULD_ALIGN_(\d+)_HERE>:").expect("valid marker regex")
    })
}

/// A label found in the disassembly together with its address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentMarker {
    /// Required boundary in bytes. `None` if the digits overflow.
    pub alignment: Option<u64>,
    /// Label address. `None` if it does not fit in 64 bits.
    pub address: Option<u64>,
    /// The matched text, kept for diagnostics.
    pub raw: String,
}

impl AlignmentMarker {
    pub fn symbol(&self) -> String {
        match self.alignment {
            Some(n) => format!("SHOULD_ALIGN_{}_HERE", n),
            None => self.raw.clone(),
        }
    }

    /// Distance past the previous boundary, or `None` if it cannot be computed.
    pub fn offset(&self) -> Option<u64> {
        match (self.address, self.alignment) {
            (Some(addr), Some(n)) if n != 0 => Some(addr % n),
            _ => None,
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.offset() == Some(0)
    }
}

/// Every marker occurrence in `text`, in order of appearance.
pub fn scan_markers(text: &str) -> Vec<AlignmentMarker> {
    marker_pattern()
        .captures_iter(text)
        .map(|caps| AlignmentMarker {
            address: u64::from_str_radix(&caps[1], 16).ok(),
            alignment: caps[2].parse().ok(),
            raw: caps[0].to_string(),
        })
        .collect()
}

/// Outcome of checking one dump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentReport {
    pub markers: Vec<AlignmentMarker>,
}

impl AlignmentReport {
    /// True iff at least one marker was found and all of them are aligned.
    pub fn passed(&self) -> bool {
        !self.markers.is_empty() && self.markers.iter().all(AlignmentMarker::is_aligned)
    }

    pub fn misaligned(&self) -> impl Iterator<Item = &AlignmentMarker> {
        self.markers.iter().filter(|m| !m.is_aligned())
    }
}

/// Checks the disassembly text, failing with [`HarnessError::NoMarkers`] if
/// it contains no marker at all.
pub fn check_text(text: &str) -> Result<AlignmentReport> {
    let markers = scan_markers(text);
    if markers.is_empty() {
        return Err(HarnessError::NoMarkers);
    }
    Ok(AlignmentReport { markers })
}

/// Prints the per-marker verdict lines for `label`.
pub fn print_report(label: &str, report: &AlignmentReport) {
    for marker in &report.markers {
        let symbol = marker.symbol();
        let address = marker
            .address
            .map(|a| format!("{:#x}", a))
            .unwrap_or_else(|| "<unparsable>".to_string());
        let boundary = marker
            .alignment
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());

        if marker.is_aligned() {
            println!("✓ Alignment check passed for {}", label);
            println!(
                "  {}: {} (aligned to {}-byte boundary)",
                symbol, address, boundary
            );
        } else {
            println!("✗ Alignment check failed for {}", label);
            println!(
                "  {}: {} (NOT aligned to {}-byte boundary)",
                symbol, address, boundary
            );
            match marker.offset() {
                Some(off) => println!("  Offset from {}-byte boundary: {} bytes", boundary, off),
                None => println!("  Boundary or address is not usable"),
            }
        }
        log::debug!("{}: {:?}", label, marker);
    }
}
