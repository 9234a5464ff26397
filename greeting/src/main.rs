use anyhow::Result;

fn main() -> Result<()> {
    println!("{}", greeting::get_greeting()?);
    Ok(())
}
