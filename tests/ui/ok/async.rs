#[calltrace::calltrace]
async fn f(a: u32) -> u32 {
    a
}

#[calltrace::calltrace]
async fn g(a: u32) -> Result<u32, u32> {
    Ok(a)
}

#[calltrace::calltrace(keyed = [a])]
async fn h(a: u32) -> Result<u32, u32> {
    Err(a)
}

#[calltrace::calltrace]
async fn i(a: u32) -> Result<u32, String> {
    let a = async move { a }.await;
    if a == 0 {
        return Err("zero".to_string());
    }
    Ok(a)
}

#[tokio::main]
async fn main() {
    f(1).await;
    g(1).await.ok();
    h(1).await.ok();
    i(0).await.ok();
}
