//! File version extraction from an executable's version resource.
//!
//! The version resource of a PE image embeds a `VS_FIXEDFILEINFO` block:
//!
//! ```text
//! offset  field
//!   0     dwSignature        0xFEEF04BD
//!   4     dwStrucVersion     0x00010000
//!   8     dwFileVersionMS    major << 16 | minor
//!  12     dwFileVersionLS    build << 16 | revision
//!  ...
//! ```
//!
//! On Windows the block is obtained through `GetFileVersionInfoW` and
//! `VerQueryValueW`. Elsewhere, or when the OS reports no resource, the raw
//! bytes are scanned for the signature instead. The scan prefers the block
//! that directly follows the `VS_VERSION_INFO` key.

use std::path::Path;

use drvgen_core::domain::ToolchainVersion;
use tracing::debug;

const SIGNATURE: u32 = 0xFEEF_04BD;
const STRUCT_VERSION: u32 = 0x0001_0000;
const HEADER_LEN: usize = 16;

/// UTF-16 key of the root version resource node, NUL included.
const ROOT_KEY: &str = "VS_VERSION_INFO\0";

/// Read the file version of the executable at `path`.
pub fn read_file_version(path: &Path) -> Option<ToolchainVersion> {
    if let Some(version) = query_version_resource(path) {
        return Some(version);
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Cannot read executable");
            return None;
        }
    };
    let version = parse_fixed_file_info(&bytes);
    if version.is_none() {
        debug!(path = %path.display(), "No VS_FIXEDFILEINFO block found");
    }
    version
}

#[cfg(windows)]
fn query_version_resource(path: &Path) -> Option<ToolchainVersion> {
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use std::{mem, ptr};

    use windows_sys::Win32::Storage::FileSystem::{
        GetFileVersionInfoSizeW, GetFileVersionInfoW, VS_FIXEDFILEINFO, VerQueryValueW,
    };

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();

    let mut handle = 0u32;
    // SAFETY: `wide` is NUL-terminated and outlives the call.
    let size = unsafe { GetFileVersionInfoSizeW(wide.as_ptr(), &mut handle) };
    if size == 0 {
        debug!(path = %path.display(), "OS reports no version resource");
        return None;
    }

    let mut block = vec![0u8; size as usize];
    // SAFETY: `block` holds `size` writable bytes.
    let ok = unsafe { GetFileVersionInfoW(wide.as_ptr(), 0, size, block.as_mut_ptr().cast()) };
    if ok == 0 {
        return None;
    }

    let root = [u16::from(b'\\'), 0];
    let mut info: *mut c_void = ptr::null_mut();
    let mut len = 0u32;
    // SAFETY: `block` was filled by GetFileVersionInfoW and `root` is NUL-terminated.
    let ok = unsafe { VerQueryValueW(block.as_ptr().cast(), root.as_ptr(), &mut info, &mut len) };
    if ok == 0 || info.is_null() || (len as usize) < mem::size_of::<VS_FIXEDFILEINFO>() {
        return None;
    }

    // SAFETY: `info` points into `block`, which is alive, and `len` covers the struct.
    let fixed = unsafe { ptr::read_unaligned(info.cast::<VS_FIXEDFILEINFO>()) };
    if fixed.dwSignature != SIGNATURE {
        return None;
    }
    Some(ToolchainVersion::from_words(
        fixed.dwFileVersionMS,
        fixed.dwFileVersionLS,
    ))
}

#[cfg(not(windows))]
fn query_version_resource(_path: &Path) -> Option<ToolchainVersion> {
    None
}

/// Find the `VS_FIXEDFILEINFO` block in `bytes`.
///
/// A block right after the `VS_VERSION_INFO` key wins. Otherwise the first
/// well-formed block anywhere in the image is used.
pub fn parse_fixed_file_info(bytes: &[u8]) -> Option<ToolchainVersion> {
    keyed_block(bytes).or_else(|| first_block(bytes))
}

fn keyed_block(bytes: &[u8]) -> Option<ToolchainVersion> {
    let key: Vec<u8> = ROOT_KEY.encode_utf16().flat_map(u16::to_le_bytes).collect();

    bytes
        .windows(key.len())
        .enumerate()
        .filter(|(_, w)| *w == key.as_slice())
        .find_map(|(at, _)| {
            // The value starts on the next 32-bit boundary after the key.
            let end = at + key.len();
            (end..end + 4).find_map(|start| bytes.get(start..start + HEADER_LEN).and_then(decode))
        })
}

fn first_block(bytes: &[u8]) -> Option<ToolchainVersion> {
    bytes.windows(HEADER_LEN).find_map(decode)
}

fn decode(header: &[u8]) -> Option<ToolchainVersion> {
    if read_u32(header, 0) != SIGNATURE || read_u32(header, 4) != STRUCT_VERSION {
        return None;
    }
    Some(ToolchainVersion::from_words(
        read_u32(header, 8),
        read_u32(header, 12),
    ))
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Encode a minimal `VS_FIXEDFILEINFO` header. Used to build fixtures.
pub fn encode_fixed_file_info(version: ToolchainVersion) -> Vec<u8> {
    let packed = version.packed();
    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend_from_slice(&SIGNATURE.to_le_bytes());
    out.extend_from_slice(&STRUCT_VERSION.to_le_bytes());
    out.extend_from_slice(&((packed >> 32) as u32).to_le_bytes());
    out.extend_from_slice(&(packed as u32).to_le_bytes());
    out
}
