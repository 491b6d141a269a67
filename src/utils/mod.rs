// webfit/src/utils/mod.rs
use std::path::{Path, PathBuf};

const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// `dest_dir/<input file stem>.webp`.
pub fn webp_output_path(input_path: &Path, dest_dir: &Path) -> PathBuf {
    let file_name = input_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("image"));

    dest_dir.join(file_name.with_extension("webp"))
}

pub fn is_jpeg(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| JPEG_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

pub fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webp_output_path() {
        let out = webp_output_path(Path::new("inputs/holiday.photo.JPG"), Path::new("outputs"));
        assert_eq!(out, PathBuf::from("outputs/holiday.photo.webp"));

        let out = webp_output_path(Path::new("a.jpeg"), Path::new("x/y"));
        assert_eq!(out, PathBuf::from("x/y/a.webp"));
    }

    #[test]
    fn test_is_jpeg() {
        assert!(is_jpeg(Path::new("a.jpg")));
        assert!(is_jpeg(Path::new("a.JPEG")));
        assert!(!is_jpeg(Path::new("a.png")));
        assert!(!is_jpeg(Path::new("jpg")));
    }

    #[test]
    fn test_kilobytes_rounding() {
        assert_eq!(format!("{:.0}", kilobytes(0)), "0");
        assert_eq!(format!("{:.0}", kilobytes(400)), "0");
        assert_eq!(format!("{:.0}", kilobytes(1_700)), "2");
        assert_eq!(format!("{:.0}", kilobytes(286_720)), "280");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }
}
