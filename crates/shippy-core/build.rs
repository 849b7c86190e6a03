/// Generates the gRPC client, server, and message types for
/// `proto/consignment.proto` with `tonic-prost-build`.
///
/// Every message in the `consignment` package additionally derives
/// `serde::Serialize` and `serde::Deserialize`, with all fields defaulted, so
/// that manifests can be written by hand as JSON and submitted by the CLI.
///
/// A file descriptor set is written next to the generated code so the server
/// can register itself with gRPC reflection:
///
/// ```rust
/// pub mod proto {
///     tonic::include_proto!("consignment");
///     pub const FILE_DESCRIPTOR_SET: &[u8] =
///         tonic::include_file_descriptor_set!("consignment_descriptor");
/// }
/// ```
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("consignment_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config
        .type_attribute(
            ".consignment",
            "#[derive(serde::Serialize, serde::Deserialize)]",
        )
        .type_attribute(".consignment", "#[serde(default)]")
        .file_descriptor_set_path(&descriptor_path);

    println!("cargo:rerun-if-changed=proto/consignment.proto");

    tonic_prost_build::configure().compile_with_config(
        config,
        &["proto/consignment.proto"],
        &["proto"],
    )?;
    Ok(())
}
