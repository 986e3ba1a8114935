//! Listing filters that narrow a raw listing down to one day's clips.

use tracing::debug;

use crate::domain::{RemoteFile, ScanPolicy};

use super::classifier::{find_clip, parse_day_key};

/// Names of complete clips dated to `day_key`, in listing order.
///
/// An entry whose size is not exactly one slice is incomplete. Under
/// [`ScanPolicy::TrustedPrefix`] the first incomplete entry ends the scan and
/// nothing after it is considered; under [`ScanPolicy::FullScan`] it is skipped.
/// Undated complete entries are skipped under either policy. Duplicates are
/// kept.
pub fn filter_target_day_complete(
    files: &[RemoteFile],
    day_key: &str,
    policy: ScanPolicy,
) -> Vec<String> {
    let mut day_files = Vec::new();

    for (index, file) in files.iter().enumerate() {
        if !file.is_complete() {
            match policy {
                ScanPolicy::TrustedPrefix => {
                    debug!(
                        "Stopping scan at entry {} ({}, {} bytes)",
                        index, file.name, file.size
                    );
                    break;
                }
                ScanPolicy::FullScan => continue,
            }
        }

        if parse_day_key(&file.name) == Some(day_key) {
            day_files.push(file.name.clone());
        }
    }

    day_files
}

/// Clip names from the in-flight copy queue whose start date is `day_key`.
///
/// Queue entries are task descriptions; the clip name is extracted from each.
/// Under [`ScanPolicy::TrustedPrefix`] the first entry without a clip name ends
/// the scan.
pub fn filter_in_flight_to_day(
    entries: &[RemoteFile],
    day_key: &str,
    policy: ScanPolicy,
) -> Vec<String> {
    let mut day_files = Vec::new();

    for entry in entries {
        let Some(clip) = find_clip(&entry.name) else {
            match policy {
                ScanPolicy::TrustedPrefix => {
                    debug!("Stopping in-flight scan at task: {}", entry.name);
                    break;
                }
                ScanPolicy::FullScan => continue,
            }
        };

        if clip.start_day == day_key {
            day_files.push(clip.name.to_string());
        }
    }

    day_files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SLICE_SIZE;

    const DAY: &str = "20240229";

    fn clip(start: &str, size: u64) -> RemoteFile {
        RemoteFile::new(format!("00_{}080000_{}081000.mp4", start, start), size)
    }

    #[test]
    fn test_keeps_complete_clips_of_the_day_in_order() {
        let files = vec![
            RemoteFile::new("00_20240229090000_20240229091000.mp4", SLICE_SIZE),
            clip("20240228", SLICE_SIZE),
            RemoteFile::new("00_20240229080000_20240229081000.mp4", SLICE_SIZE),
        ];
        let result = filter_target_day_complete(&files, DAY, ScanPolicy::TrustedPrefix);
        assert_eq!(
            result,
            vec![
                "00_20240229090000_20240229091000.mp4",
                "00_20240229080000_20240229081000.mp4"
            ]
        );
    }

    #[test]
    fn test_trusted_prefix_stops_at_first_incomplete() {
        let files = vec![
            clip(DAY, SLICE_SIZE),
            clip(DAY, SLICE_SIZE - 1),
            RemoteFile::new("00_20240229120000_20240229121000.mp4", SLICE_SIZE),
        ];
        let result = filter_target_day_complete(&files, DAY, ScanPolicy::TrustedPrefix);
        assert_eq!(result, vec![clip(DAY, 0).name]);
    }

    #[test]
    fn test_incomplete_first_entry_yields_nothing() {
        let files = vec![
            clip(DAY, 1024),
            clip(DAY, SLICE_SIZE),
            clip(DAY, SLICE_SIZE),
        ];
        assert!(filter_target_day_complete(&files, DAY, ScanPolicy::TrustedPrefix).is_empty());
    }

    #[test]
    fn test_full_scan_skips_incomplete_entries() {
        let late = RemoteFile::new("00_20240229120000_20240229121000.mp4", SLICE_SIZE);
        let files = vec![clip(DAY, 1024), late.clone(), clip(DAY, SLICE_SIZE + 1)];
        let result = filter_target_day_complete(&files, DAY, ScanPolicy::FullScan);
        assert_eq!(result, vec![late.name]);
    }

    #[test]
    fn test_undated_complete_entries_are_skipped() {
        let files = vec![
            RemoteFile::new("thumbnail.jpg", SLICE_SIZE),
            clip(DAY, SLICE_SIZE),
        ];
        let result = filter_target_day_complete(&files, DAY, ScanPolicy::TrustedPrefix);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let files = vec![clip(DAY, SLICE_SIZE), clip(DAY, SLICE_SIZE)];
        let result = filter_target_day_complete(&files, DAY, ScanPolicy::TrustedPrefix);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_in_flight_extracts_day_clips() {
        let entries = vec![
            RemoteFile::new(
                "copy [/cam](/00_20240229080000_20240229081000.mp4) to [/cloud/2024/02/29](/)",
                0,
            ),
            RemoteFile::new(
                "copy [/cam](/00_20240228080000_20240228081000.mp4) to [/cloud/2024/02/28](/)",
                0,
            ),
        ];
        let result = filter_in_flight_to_day(&entries, DAY, ScanPolicy::TrustedPrefix);
        assert_eq!(result, vec!["00_20240229080000_20240229081000.mp4"]);
    }

    #[test]
    fn test_in_flight_trusted_prefix_stops_at_unrecognised_task() {
        let entries = vec![
            RemoteFile::new("copy [/docs](/report.pdf) to [/backup](/)", 0),
            RemoteFile::new("00_20240229080000_20240229081000.mp4", 0),
        ];
        assert!(filter_in_flight_to_day(&entries, DAY, ScanPolicy::TrustedPrefix).is_empty());
        assert_eq!(
            filter_in_flight_to_day(&entries, DAY, ScanPolicy::FullScan),
            vec!["00_20240229080000_20240229081000.mp4"]
        );
    }
}
