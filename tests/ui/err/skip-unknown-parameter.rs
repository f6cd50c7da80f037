#[calltrace::calltrace(skip = [token])]
fn f(a: u32) -> Result<u32, String> {
    Ok(a)
}

fn main() {}
