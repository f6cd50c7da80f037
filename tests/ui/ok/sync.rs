#[calltrace::calltrace]
fn f(a: u32) -> u32 {
    a
}

#[calltrace::calltrace]
fn g(a: u32) -> Result<u32, u32> {
    Ok(a)
}

#[calltrace::calltrace(keyed = [b])]
fn h(a: u32, b: &str) -> Result<u32, std::num::ParseIntError> {
    Ok(a + b.parse::<u32>()?)
}

#[calltrace::calltrace]
fn i(a: u32) -> Result<u32, String> {
    if a == 0 {
        return Err("zero".to_string());
    }
    Ok(a)
}

#[calltrace::calltrace]
fn j() {}

fn main() {
    f(1);
    g(1).ok();
    h(1, "2").ok();
    h(1, "x").ok();
    i(0).ok();
    j();
}
