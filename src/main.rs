fn main() -> boat_race_lib::Result<()> {
    boat_race_lib::run()
}
