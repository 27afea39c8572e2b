/// Render the meal analysis prompt for `dish_name`.
///
/// The dish name is inserted as-is. Braces or newlines in it are kept
/// literally and never treated as placeholders.
pub fn build_meal_prompt(dish_name: &str) -> String {
    format!(
        "### MEAL NAME:\n\
         {}\n\
         \n\
         ### INSTRUCTION:\n\
         Find nutritional breakdown of provided meal name.\n\
         \n\
         Return **only valid JSON** in the following format:\n\
         {{\n    \
             \"dish_name\": \"Chicken Salad\",\n    \
             \"ingredients\": [\"chicken\", \"lettuce\", \"tomato\", \"olive oil\"],\n    \
             \"macros\": {{\n        \
                 \"calories\": 350,\n        \
                 \"protein\": 30,\n        \
                 \"carbs\": 10,\n        \
                 \"fat\": 15\n    \
             }},\n    \
             \"analysis_text\": \"It is a healthy and protein-rich meal, I have considered 1bowl(200g) of salad as nothing mentioned.\"\n\
         }}\n\
         \n\
         Rules:\n\
         - Do NOT add any extra explanation or preamble.\n\
         - Respond with JSON only.\n",
        dish_name
    )
}
