use vergen::{Emitter, RustcBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rustc = RustcBuilder::all_rustc()?;
    Emitter::default().add_instructions(&rustc)?.emit()?;
    Ok(())
}
