use std::fmt;

struct Token;

type Outcome<T> = std::result::Result<T, String>;

#[derive(Debug)]
struct Counter {
    count: u32,
}

impl Counter {
    #[calltrace::calltrace(skip = [token])]
    fn bump(&mut self, token: Token, by: u32) -> Result<u32, String> {
        let _ = token;
        self.count = self.count.checked_add(by).ok_or("overflow")?;
        Ok(self.count)
    }

    #[calltrace::calltrace(skip = [self], fallible = true)]
    fn checked(&self, by: u32) -> Outcome<u32> {
        self.count.checked_add(by).ok_or_else(|| "overflow".to_string())
    }
}

#[calltrace::calltrace(fallible = false)]
fn not_traced_as_fallible(a: u32) -> Result<u32, ()> {
    Ok(a)
}

#[calltrace::calltrace]
fn generic<T: fmt::Debug + Clone>(value: T) -> Result<T, String>
where
    T: PartialEq,
{
    Ok(value.clone())
}

#[calltrace::calltrace]
fn opaque(a: u32) -> impl Iterator<Item = u32> {
    0..a
}

#[calltrace::calltrace(destination = std::env::temp_dir().join("calltrace-ui").join("options.txt"))]
fn to_file(a: u32) -> Result<u32, String> {
    Ok(a)
}

fn main() {
    let mut counter = Counter { count: 0 };
    counter.bump(Token, 1).ok();
    counter.checked(u32::MAX).ok();
    not_traced_as_fallible(1).ok();
    generic("x").ok();
    assert_eq!(opaque(3).count(), 3);
    to_file(1).ok();
}
