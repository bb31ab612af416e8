//! Example: write a sinogram and a reconstruction as slice files, read them back, clean up
//!
//! Run with: cargo run --example sinogram_roundtrip

use mbir_volume::config::{format_params, write_params};
use mbir_volume::{validate, ConfigMap, ConfigValue, VolumeFileSet, VolumeShape};
use ndarray::Array3;

fn main() -> anyhow::Result<()> {
    stderrlog::new()
        .module("mbir_volume")
        .verbosity(2usize)
        .init()?;

    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path().join("scan_");
    let root = root.to_str().ok_or_else(|| anyhow::anyhow!("non UTF-8 temp path"))?;

    // 90 views, 4 slices, 128 detector channels
    let shape = VolumeShape::sinogram(90, 4, 128);
    println!("Sinogram: {}", shape.summary());
    let sino = Array3::from_shape_fn((90, 4, 128), |(view, slice, channel)| {
        (view as f32 * 0.1).sin() + slice as f32 + channel as f32 * 1e-3
    });

    let sino_files = VolumeFileSet::new(root, ".2Dsinodata");
    sino_files.write_sinogram(&sino)?;
    let restored = sino_files.read_sinogram(90, 4, 128)?;
    anyhow::ensure!(restored == sino, "sinogram changed on disk");
    println!("✓ Sinogram round trip exact");

    let recon = Array3::<f32>::from_elem((4, 64, 64), 0.02);
    let recon_files = VolumeFileSet::new(root, ".2Drecon");
    recon_files.write_recon(&recon)?;
    anyhow::ensure!(recon_files.read_recon(64, 64, 4)? == recon, "recon changed on disk");
    println!("✓ Reconstruction round trip exact");

    // Parameter file alongside the data
    let mut params = ConfigMap::new();
    params.insert("p".into(), ConfigValue::from(2.5));
    params.insert("q".into(), ConfigValue::from(2.0));
    params.insert("weight_type".into(), ConfigValue::from("transmission"));
    let (checked, warnings) = validate(&params);
    for warning in &warnings {
        println!("  warning: {}", warning);
    }
    checked.write_into(&mut params);
    write_params(temp_dir.path().join("params.yml"), &params)?;
    print!("{}", format_params(&params));

    sino_files.delete(4)?;
    recon_files.delete(4)?;
    println!("✓ Slice files removed");
    Ok(())
}
