use appointment_forecast::args::PredictArgs;
use appointment_forecast::sql::schema::{into_document, Document};
use appointment_forecast::store::memory::MemoryStore;
use appointment_forecast::store::AppointmentStore;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

#[allow(dead_code)]
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn args(branch: &str, pet_type: Option<&str>) -> PredictArgs {
    PredictArgs {
        branch: branch.to_string(),
        pet_type: pet_type.map(str::to_string),
    }
}

#[allow(dead_code)]
pub fn appointment(branch: &str, date: &str, pet_type: &str) -> Document {
    into_document(json!({
        "petName": "Bruno",
        "ownerName": "Kasun",
        "contactNumber": "0771234567",
        "appointmentDate": date,
        "reason": "Checkup",
        "branch": branch,
        "petType": pet_type,
        "status": "Pending"
    }))
    .unwrap()
}

// Eight weeks of Colombo bookings with busier weekends, plus noise from other branches
#[allow(dead_code)]
pub fn populated_store() -> AppointmentStore {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut appointments = Vec::new();

    for offset in 0..56 {
        let day = start + chrono::Duration::days(offset);
        let per_day = if offset % 7 >= 5 { 6 } else { 3 };

        for slot in 0..per_day {
            let when = day.and_hms_opt(9 + slot as u32, 0, 0).unwrap();
            let pet_type = if slot % 2 == 0 { "Dog" } else { "Cat" };
            appointments.push(appointment(
                "Colombo Branch",
                &when.format("%Y-%m-%dT%H:%M:%S.000Z").to_string(),
                pet_type,
            ));
        }

        appointments.push(appointment(
            "Kandy Branch",
            &day.format("%Y-%m-%d").to_string(),
            "Bird",
        ));
    }

    AppointmentStore::Memory(
        MemoryStore::new()
            .with_collection("users", vec![into_document(json!({"email": "admin@pets.lk"})).unwrap()])
            .with_collection("appointments", appointments),
    )
}
