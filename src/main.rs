fn main() -> split_objects::Result<()> {
    split_objects::run(wild::args_os())
}
