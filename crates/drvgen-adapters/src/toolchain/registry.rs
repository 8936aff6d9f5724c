//! Installed-software lookup in the Windows registry.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::path::PathBuf;
use std::ptr;

use tracing::{debug, trace};
use windows_sys::Win32::Foundation::{ERROR_NO_MORE_ITEMS, ERROR_SUCCESS};
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, KEY_READ, RRF_RT_REG_SZ, RegCloseKey, RegEnumKeyExW, RegGetValueW,
    RegOpenKeyExW,
};

/// 32-bit view of the uninstall table, where Visual Studio registers itself.
pub const UNINSTALL_KEY: &str = r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall";

const MAX_KEY_NAME: usize = 256;

fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(Some(0)).collect()
}

/// Open key handle, closed on drop.
struct RegKey(HKEY);

impl RegKey {
    fn open_local_machine(subkey: &str) -> Option<Self> {
        let subkey = to_wide(subkey);
        let mut handle: HKEY = ptr::null_mut();
        // SAFETY: `subkey` is NUL-terminated and outlives the call.
        let status =
            unsafe { RegOpenKeyExW(HKEY_LOCAL_MACHINE, subkey.as_ptr(), 0, KEY_READ, &mut handle) };
        (status == ERROR_SUCCESS).then_some(Self(handle))
    }

    fn subkey_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut buffer = [0u16; MAX_KEY_NAME];

        for index in 0.. {
            let mut len = buffer.len() as u32;
            // SAFETY: buffer and len describe a valid writable region.
            let status = unsafe {
                RegEnumKeyExW(
                    self.0,
                    index,
                    buffer.as_mut_ptr(),
                    &mut len,
                    ptr::null(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                )
            };
            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            if status != ERROR_SUCCESS {
                trace!(index, status, "Skipping unreadable subkey");
                continue;
            }
            names.push(String::from_utf16_lossy(&buffer[..len as usize]));
        }

        names
    }

    /// Read a string value from a direct subkey.
    fn string_value(&self, subkey: &str, value: &str) -> Option<String> {
        let subkey = to_wide(subkey);
        let value = to_wide(value);

        let mut size = 0u32;
        // SAFETY: a null data pointer asks for the required size only.
        let status = unsafe {
            RegGetValueW(
                self.0,
                subkey.as_ptr(),
                value.as_ptr(),
                RRF_RT_REG_SZ,
                ptr::null_mut(),
                ptr::null_mut(),
                &mut size,
            )
        };
        if status != ERROR_SUCCESS || size == 0 {
            return None;
        }

        let mut data = vec![0u16; (size as usize).div_ceil(2)];
        // SAFETY: `data` holds at least `size` bytes.
        let status = unsafe {
            RegGetValueW(
                self.0,
                subkey.as_ptr(),
                value.as_ptr(),
                RRF_RT_REG_SZ,
                ptr::null_mut(),
                data.as_mut_ptr().cast(),
                &mut size,
            )
        };
        if status != ERROR_SUCCESS {
            return None;
        }

        let len = data.iter().position(|&c| c == 0).unwrap_or(data.len());
        Some(String::from_utf16_lossy(&data[..len]))
    }
}

impl Drop for RegKey {
    fn drop(&mut self) {
        // SAFETY: the handle came from RegOpenKeyExW and is closed once.
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

/// `InstallLocation` of the first uninstall entry whose `DisplayName`
/// equals `product_name`.
pub fn find_install_location(product_name: &str) -> Option<PathBuf> {
    let root = RegKey::open_local_machine(UNINSTALL_KEY)?;

    for name in root.subkey_names() {
        let Some(display_name) = root.string_value(&name, "DisplayName") else {
            continue;
        };
        if display_name != product_name {
            continue;
        }

        debug!(key = %name, "Matched product in uninstall table");
        match root.string_value(&name, "InstallLocation") {
            Some(location) if !location.trim().is_empty() => {
                return Some(PathBuf::from(location));
            }
            _ => debug!(key = %name, "Entry has no InstallLocation"),
        }
    }

    None
}
