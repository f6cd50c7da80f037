#[calltrace::calltrace]
fn f(_: u32) -> Result<u32, String> {
    Ok(1)
}

fn main() {}
