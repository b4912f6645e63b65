use crate::wire::{Instruction, TripRequest};

/// Default response shape requested from the model. Extraction is
/// schema-agnostic; this skeleton only parameterizes the prompt, and callers
/// may substitute their own.
pub fn itinerary_schema() -> &'static str {
r#"{
 "title": "<short title>",
 "destination": "<city/country>",
 "days": [
   {
     "day": 1,
     "summary": "<one sentence>",
     "activities": [
       {"time": "morning/afternoon/evening", "activity": "<short>", "est_cost": "<number and currency>"}
     ],
     "daily_cost": "<number and currency>"
   }
 ],
 "total_estimated_cost": "<number and currency>",
 "recommended_hostels": [ {"name": "", "approx_price": "", "note": ""} ],
 "transport_tips": ["short tip strings"],
 "money_saving_tips": ["short tip strings"]
}"#
}

pub fn system_prompt() -> String {
"You are a travel assistant that writes SHORT, CONCISE, student-friendly day-by-day itineraries.
Return JSON only (no extra text, no markdown fences). Use local currency. Keep each day's content brief.
Provide numeric costs rounded to the nearest whole number.".to_string()
}

pub fn user_prompt(req: &TripRequest, schema: &str) -> String {
    format!(
"Respond with a single JSON object matching this schema:
{schema}

Now generate a concise itinerary for:
- destination: {destination}
- days: {days}
- budget: {budget}
- interests: {interests}
- transport preference: {transport}

Keep answers short.",
schema = schema,
destination = req.destination,
days = req.days,
budget = req.budget,
interests = req.interests.as_deref().unwrap_or("general student-friendly experiences"),
transport = req.transport.as_deref().unwrap_or("budget"))
}

pub fn build(req: &TripRequest, schema: &str) -> Instruction {
    Instruction { system: system_prompt(), user: user_prompt(req, schema) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TripRequest {
        TripRequest {
            destination: "Porto".into(),
            days: 3,
            budget: "300 EUR".into(),
            interests: None,
            transport: None,
        }
    }

    #[test]
    fn user_prompt_carries_trip_fields_and_schema() {
        let p = user_prompt(&request(), itinerary_schema());
        assert!(p.contains("- destination: Porto"));
        assert!(p.contains("- days: 3"));
        assert!(p.contains("- budget: 300 EUR"));
        assert!(p.contains("\"total_estimated_cost\""));
        assert!(p.contains("\"recommended_hostels\""));
    }

    #[test]
    fn absent_optionals_fall_back_to_defaults() {
        let p = user_prompt(&request(), itinerary_schema());
        assert!(p.contains("- interests: general student-friendly experiences"));
        assert!(p.contains("- transport preference: budget"));
    }

    #[test]
    fn provided_optionals_are_used_verbatim() {
        let mut req = request();
        req.interests = Some("museums".into());
        req.transport = Some("train".into());
        let p = user_prompt(&req, itinerary_schema());
        assert!(p.contains("- interests: museums"));
        assert!(p.contains("- transport preference: train"));
    }

    #[test]
    fn schema_shape_is_a_parameter() {
        let p = user_prompt(&request(), r#"{"only_field": ""}"#);
        assert!(p.contains("\"only_field\""));
        assert!(!p.contains("recommended_hostels"));
    }

    #[test]
    fn system_prompt_demands_json_only() {
        let ins = build(&request(), itinerary_schema());
        assert!(ins.system.contains("JSON only"));
        assert!(ins.user.contains("single JSON object"));
    }
}
