use reelcine::state::App;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(App::boot, App::update, App::view)
        .title("ReelCine")
        .subscription(App::subscription)
        .run()
}
