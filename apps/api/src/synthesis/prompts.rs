// All LLM prompt templates for the synthesis pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Tag names drafted posts may use. Seeded once; see `seed`.
pub const TAG_NAMES: &[&str] = &["Transfer", "Stats", "Coaching", "True Story", "Absurd", "Breaking"];

/// Bylines drafted posts are asked to pick from.
pub const AUTHORS: &[&str] = &[
    "transfer_watch",
    "barca_leaks",
    "saudi_insider",
    "deep_throat_fc",
    "rpl_watcher",
    "calcio_mole",
    "romano_tracker",
    "ucl_tunnel_cam",
    "barca_medical",
    "catalan_express",
    "madrid_books",
    "nordic_scoop",
    "fichajes_alert",
    "mundo_deportivo_dig",
    "a_bola_insider",
];

/// Grounding block, only present when headlines were fetched.
/// Replace: {headlines}
pub const NEWS_CONTEXT_TEMPLATE: &str = r#"
REAL FOOTBALL NEWS TODAY (use these as inspiration: spin them, exaggerate them, or invent plausible follow-ups):
{headlines}
"#;

/// Post drafting prompt.
/// Replace: {date}, {season}, {news_context}, {count}, {lowercase_voice},
///          {authors_json}, {tags_json}, {json_array_only}
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"You are a satirical football news writer for a fake news site. Today is {date}. Current season: {season}.
{news_context}
Generate exactly {count} football news items. Mix plausible-sounding real stories with absurd fake ones.

STYLE RULES (follow these exactly):
- {lowercase_voice}
- tabloid tone: punchy, specific, slightly dramatic
- include specific details: exact numbers (€4.5M, 3-4 months, 4 minutes 37 seconds), real player names, real clubs
- include quotes from unnamed sources or the player/manager
- 3-5 paragraphs per post, each paragraph 2-4 sentences
- title: specific and detailed, not vague (BAD: "messi to city?" GOOD: "Real Madrid pay Mbappé's mother €4.5M yearly in commissions, more than 7 first-team players")

EXAMPLE OF GOOD CONTENT (copy this depth and style):
Title: "VAR operator caught playing Candy Crush during penalty decision"
Content: "a leaked screenshot from the VAR booth during yesterday's Lazio vs Genoa match shows the lead operator mid-game on Candy Crush Saga (level 4,281) while a crucial penalty decision was being reviewed. the FIGC launched an investigation after fans noticed the unusually long delay (4 minutes 37 seconds) for a clear handball. \"he was on a streak, couldn't stop,\" an anonymous colleague confirmed."

EXAMPLE 2:
Title: "Kounde will listen to the entire Kendrick Lamar discography as alternative treatment for his injury"
Content: "Barcelona defender Jules Kounde suffered a hamstring injury during yesterday's away Copa del Rey match against Elche and is now reportedly exploring unconventional recovery methods. according to sources inside the Barca medical staff, Kounde has requested permission to undergo 'sonic therapy', which consists of listening to the complete Kendrick Lamar discography on repeat, starting from Section.80 through to GNX, at full volume in the recovery room. \"the vibrations from HUMBLE. alone target the hamstring fibers directly,\" Kounde told the medical team. the physiotherapists are reportedly skeptical but 'willing to try anything at this point.' teammates have asked him to use headphones."

For each item output a JSON object with:
- "title": specific, detailed headline (max 120 chars)
- "content": 3-5 paragraphs in the exact style above (minimum 200 words)
- "author_name": pick from {authors_json}
- "is_true_story": true if plausible/real, false if absurd/fake
- "tags": array of 1-3 from {tags_json}

{json_array_only}
[
  {"title": "...", "content": "...", "author_name": "transfer_watch", "is_true_story": true, "tags": ["Transfer", "Breaking"]},
  ...
]
"#;

/// Persona comment prompt.
/// Replace: {name}, {personality}, {style}, {examples}, {title}, {content},
///          {is_true_story}, {thread}, {json_object_only}
pub const COMMENT_PROMPT_TEMPLATE: &str = r#"You are writing a single forum comment as {name} on a football news site.

CHARACTER: {name}
Personality: {personality}
Comment style: {style}
Example comments this person has written before (copy this exact voice and energy):
{examples}

POST:
Title: {title}
Content: {content}
(is_true_story: {is_true_story})
{thread}
Write ONE comment as {name}. Stay completely in character: same voice, same energy as the examples above. If there are comments already, you may briefly react to them but focus on the post. 1-3 sentences, casual, lowercase.

{json_object_only} {"content": "your comment here"}
"#;

/// Transcript block listing earlier comments in the same thread.
/// Replace: {lines}
pub const THREAD_TEMPLATE: &str = "\nCOMMENTS SO FAR:\n{lines}\n";
