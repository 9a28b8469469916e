#[macro_use]
extern crate rocket;

use dotenv::dotenv;
use mysqlposts::fairings::db::DBConnection;
use mysqlposts::logging;
use rocket::{Build, Rocket};

// --------------------------
//  ROCKET LAUNCH
// --------------------------
#[launch]
async fn rocket() -> Rocket<Build> {
    dotenv().ok();
    logging::init();

    mysqlposts::app().attach(DBConnection::mysql())
}
