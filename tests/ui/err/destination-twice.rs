#[calltrace::calltrace("logs/a.txt", destination = "logs/b.txt")]
fn f(a: u32) -> Result<u32, String> {
    Ok(a)
}

fn main() {}
