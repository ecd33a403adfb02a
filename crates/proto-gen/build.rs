// Build script to compile Protocol Buffer definitions

#[cfg(feature = "regenerate")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // bot.proto has no package, so prost names the output `_.rs`
    tonic_build::configure()
        .out_dir("src/generated")
        .build_client(true)
        .build_server(true)
        .compile_protos(&["../../proto/bot.proto"], &["../../proto/"])?;

    std::fs::rename("src/generated/_.rs", "src/generated/bot.rs")?;

    // Tell Cargo to rerun if proto files change
    println!("cargo:rerun-if-changed=../../proto/bot.proto");

    Ok(())
}

#[cfg(not(feature = "regenerate"))]
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
}
