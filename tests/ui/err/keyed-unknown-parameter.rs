#[calltrace::calltrace(keyed = [z])]
fn f(a: u32) -> Result<u32, String> {
    Ok(a)
}

fn main() {}
