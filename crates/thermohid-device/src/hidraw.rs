use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{DeviceError, Result};
use crate::info::DeviceInfo;

/// An open hidraw character device.
///
/// Each `read` on a hidraw node returns exactly one input report, so the
/// handle is read with a buffer sized to the largest expected report.
/// The descriptor is closed when the handle is dropped.
pub struct HidrawDevice {
    file: File,
    path: PathBuf,
}

impl HidrawDevice {
    /// Open the device node read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .open(&path)
            .map_err(|source| DeviceError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(?path, "opened hidraw device");
        Ok(Self { file, path })
    }

    /// Path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Query the report descriptor, name, phys and raw info.
    ///
    /// Failed queries are logged and left as `None`; probing never fails the open device.
    pub fn probe(&self) -> DeviceInfo {
        let mut info = DeviceInfo::default();

        match self.descriptor_size() {
            Ok(size) => {
                info.descriptor_size = Some(size);
                info.report_descriptor = self.report_descriptor(size).map_err(log_probe).ok();
            }
            Err(err) => log_probe(err),
        }
        info.name = self.raw_name().map_err(log_probe).ok();
        info.phys = self.raw_phys().map_err(log_probe).ok();
        info.raw = self.raw_info().map_err(log_probe).ok();

        info
    }

    #[cfg(target_os = "linux")]
    fn descriptor_size(&self) -> Result<u32> {
        crate::ioctl::descriptor_size(self.raw_fd())
    }

    #[cfg(target_os = "linux")]
    fn report_descriptor(&self, size: u32) -> Result<Vec<u8>> {
        crate::ioctl::report_descriptor(self.raw_fd(), size)
    }

    #[cfg(target_os = "linux")]
    fn raw_name(&self) -> Result<String> {
        crate::ioctl::raw_name(self.raw_fd())
    }

    #[cfg(target_os = "linux")]
    fn raw_phys(&self) -> Result<String> {
        crate::ioctl::raw_phys(self.raw_fd())
    }

    #[cfg(target_os = "linux")]
    fn raw_info(&self) -> Result<crate::info::RawInfo> {
        crate::ioctl::raw_info(self.raw_fd())
    }

    #[cfg(target_os = "linux")]
    fn raw_fd(&self) -> std::os::fd::RawFd {
        use std::os::fd::AsRawFd;
        self.file.as_raw_fd()
    }

    #[cfg(not(target_os = "linux"))]
    fn descriptor_size(&self) -> Result<u32> {
        Err(DeviceError::Unsupported)
    }

    #[cfg(not(target_os = "linux"))]
    fn report_descriptor(&self, _size: u32) -> Result<Vec<u8>> {
        Err(DeviceError::Unsupported)
    }

    #[cfg(not(target_os = "linux"))]
    fn raw_name(&self) -> Result<String> {
        Err(DeviceError::Unsupported)
    }

    #[cfg(not(target_os = "linux"))]
    fn raw_phys(&self) -> Result<String> {
        Err(DeviceError::Unsupported)
    }

    #[cfg(not(target_os = "linux"))]
    fn raw_info(&self) -> Result<crate::info::RawInfo> {
        Err(DeviceError::Unsupported)
    }
}

fn log_probe(err: DeviceError) {
    warn!(error = %err, "device descriptor query failed");
}

impl Read for HidrawDevice {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Drop for HidrawDevice {
    fn drop(&mut self) {
        debug!(path = ?self.path, "closing hidraw device");
    }
}

impl std::fmt::Debug for HidrawDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HidrawDevice")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("thermohid-device-{tag}-{}", std::process::id()))
    }

    #[test]
    fn open_missing_node_reports_path() {
        let path = temp_path("missing").join("hidraw9");
        let err = HidrawDevice::open(&path).unwrap_err();
        match err {
            DeviceError::Open { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_bounded_by_buffer() {
        let path = temp_path("reads");
        std::fs::write(&path, [0x03, 0x00, 0x0A, 0x02, 0x28]).unwrap();

        let mut device = HidrawDevice::open(&path).unwrap();
        assert_eq!(device.path(), path.as_path());

        let mut buf = [0u8; 3];
        assert_eq!(device.read(&mut buf).unwrap(), 3);
        assert_eq!(buf, [0x03, 0x00, 0x0A]);
        assert_eq!(device.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[0x02, 0x28]);
        assert_eq!(device.read(&mut buf).unwrap(), 0);

        drop(device);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn probe_on_regular_file_yields_empty_info() {
        let path = temp_path("probe");
        std::fs::write(&path, b"").unwrap();

        let device = HidrawDevice::open(&path).unwrap();
        let info = device.probe();
        assert!(info.is_empty());

        drop(device);
        let _ = std::fs::remove_file(&path);
    }
}
