//! hidraw ioctl requests (`linux/hidraw.h`).

use std::ffi::CStr;
use std::io;
use std::os::fd::RawFd;

use crate::error::{DeviceError, Result};
use crate::info::RawInfo;

/// Largest report descriptor the kernel will hand back.
pub(crate) const HID_MAX_DESCRIPTOR_SIZE: usize = 4096;

/// Buffer size used for the name and phys string queries.
const STRING_QUERY_LEN: usize = 256;

#[cfg(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc64"
))]
mod layout {
    pub(super) const SIZE_BITS: u32 = 13;
    pub(super) const READ: u32 = 2;
}

#[cfg(not(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc64"
)))]
mod layout {
    pub(super) const SIZE_BITS: u32 = 14;
    pub(super) const READ: u32 = 2;
}

const NR_SHIFT: u32 = 0;
const TYPE_SHIFT: u32 = 8;
const SIZE_SHIFT: u32 = 16;
const DIR_SHIFT: u32 = SIZE_SHIFT + layout::SIZE_BITS;

const HID_IOC_TYPE: u32 = b'H' as u32;

/// `_IOR('H', nr, size)`
const fn ior(nr: u32, size: usize) -> u32 {
    (layout::READ << DIR_SHIFT)
        | ((size as u32) << SIZE_SHIFT)
        | (HID_IOC_TYPE << TYPE_SHIFT)
        | (nr << NR_SHIFT)
}

#[repr(C)]
struct RawReportDescriptor {
    size: u32,
    value: [u8; HID_MAX_DESCRIPTOR_SIZE],
}

#[repr(C)]
#[derive(Default)]
struct RawDevInfo {
    bustype: u32,
    vendor: i16,
    product: i16,
}

pub(crate) const HIDIOCGRDESCSIZE: u32 = ior(0x01, std::mem::size_of::<libc::c_int>());
pub(crate) const HIDIOCGRDESC: u32 = ior(0x02, std::mem::size_of::<RawReportDescriptor>());
pub(crate) const HIDIOCGRAWINFO: u32 = ior(0x03, std::mem::size_of::<RawDevInfo>());
pub(crate) const HIDIOCGRAWNAME: u32 = ior(0x04, STRING_QUERY_LEN);
pub(crate) const HIDIOCGRAWPHYS: u32 = ior(0x05, STRING_QUERY_LEN);

/// Issue a read-direction ioctl into `arg`.
///
/// # Safety
///
/// `arg` must point to writable memory at least as large as the size encoded in `request`.
unsafe fn ioctl_read<T>(fd: RawFd, request: u32, name: &'static str, arg: *mut T) -> Result<i32> {
    let rc = libc::ioctl(fd, request as _, arg.cast::<libc::c_void>());
    if rc < 0 {
        return Err(DeviceError::Ioctl {
            request: name,
            source: io::Error::last_os_error(),
        });
    }
    Ok(rc)
}

pub(crate) fn descriptor_size(fd: RawFd) -> Result<u32> {
    let mut size: libc::c_int = 0;
    // SAFETY: `size` is a writable c_int, matching the size encoded in HIDIOCGRDESCSIZE.
    unsafe { ioctl_read(fd, HIDIOCGRDESCSIZE, "HIDIOCGRDESCSIZE", &mut size)? };
    Ok(size.max(0) as u32)
}

pub(crate) fn report_descriptor(fd: RawFd, size: u32) -> Result<Vec<u8>> {
    let size = (size as usize).min(HID_MAX_DESCRIPTOR_SIZE);
    let mut desc = Box::new(RawReportDescriptor {
        size: size as u32,
        value: [0u8; HID_MAX_DESCRIPTOR_SIZE],
    });
    // SAFETY: `desc` is heap-allocated with the layout of `struct hidraw_report_descriptor`.
    unsafe {
        ioctl_read(
            fd,
            HIDIOCGRDESC,
            "HIDIOCGRDESC",
            &mut *desc as *mut RawReportDescriptor,
        )?
    };
    Ok(desc.value[..size].to_vec())
}

pub(crate) fn raw_name(fd: RawFd) -> Result<String> {
    string_query(fd, HIDIOCGRAWNAME, "HIDIOCGRAWNAME")
}

pub(crate) fn raw_phys(fd: RawFd) -> Result<String> {
    string_query(fd, HIDIOCGRAWPHYS, "HIDIOCGRAWPHYS")
}

pub(crate) fn raw_info(fd: RawFd) -> Result<RawInfo> {
    let mut info = RawDevInfo::default();
    // SAFETY: `info` has the layout of `struct hidraw_devinfo`.
    unsafe { ioctl_read(fd, HIDIOCGRAWINFO, "HIDIOCGRAWINFO", &mut info)? };
    Ok(RawInfo {
        bustype: info.bustype,
        vendor: info.vendor as u16,
        product: info.product as u16,
    })
}

fn string_query(fd: RawFd, request: u32, name: &'static str) -> Result<String> {
    let mut buf = [0u8; STRING_QUERY_LEN];
    // SAFETY: `buf` is STRING_QUERY_LEN writable bytes, the length encoded in `request`.
    unsafe { ioctl_read(fd, request, name, buf.as_mut_ptr())? };
    // The kernel may fill the whole buffer without a terminator.
    buf[STRING_QUERY_LEN - 1] = 0;
    let text = CStr::from_bytes_until_nul(&buf)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(text)
}
