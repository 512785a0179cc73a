// File: crates/xychart-core/build.rs
// Summary: Links the Windows registry API that Skia's font manager depends on.

fn main() {
    #[cfg(target_os = "windows")]
    println!("cargo:rustc-link-lib=advapi32");
}
