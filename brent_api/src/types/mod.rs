mod envelope;
pub use self::envelope::Response;

mod resource;
pub use self::resource::Resource;

mod price;
pub use self::price::PriceRecord;

mod change_point;
pub use self::change_point::ChangePointRecord;

mod event;
pub use self::event::EventEntry;

mod stats;
pub use self::stats::StatsRecord;
