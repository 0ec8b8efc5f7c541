use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compiler version recorded in every report's environment block
    EmitBuilder::builder().rustc_semver().emit()?;
    Ok(())
}
