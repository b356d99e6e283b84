//! Test helpers for staging plan requests in temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use itinera_core::{PlanRequest, PointOfInterest};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

pub(super) fn utf8_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Two tight pairs of sights about three kilometres apart.
pub(super) fn paris_request() -> PlanRequest {
    PlanRequest::new(vec![
        PointOfInterest::new("Louvre", 48.8606, 2.3376, 120),
        PointOfInterest::new("Sacre-Coeur", 48.8867, 2.3431, 60),
        PointOfInterest::new("Tuileries", 48.8635, 2.3275, 45),
        PointOfInterest::new("Montmartre Museum", 48.8881, 2.3400, 60),
    ])
}

/// Write `request` as JSON into `root` and return its path.
pub(super) fn stage_request(root: &Utf8Path, request: &PlanRequest) -> Utf8PathBuf {
    let path = root.join("request.json");
    let payload = serde_json::to_vec(request).expect("serialise request");
    write_utf8(&path, &payload);
    path
}
