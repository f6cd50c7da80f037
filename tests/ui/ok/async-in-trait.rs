trait MyTrait {
    async fn work(&self) -> Result<usize, usize>;
}

#[derive(Debug)]
struct MyStruct;

impl MyTrait for MyStruct {
    #[calltrace::calltrace]
    async fn work(&self) -> Result<usize, usize> {
        Ok(1)
    }
}

#[tokio::main]
async fn main() {
    MyStruct.work().await.ok();
}
