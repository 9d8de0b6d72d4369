use loadmeter::entry;
use loadmeter::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
