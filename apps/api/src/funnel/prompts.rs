// All LLM prompt constants for the quiz funnel stages.
// Templates use {placeholder} markers that are filled by `render`.

/// System prompt for the relevance gate. Deliberately permissive.
pub const RELEVANCE_SYSTEM: &str = "You are a highly proficient AI assistant. \
    Decide whether a user's stated goal and current tools show genuine interest in exploring, \
    learning about, or using AI tools and technologies, whether for personal development, \
    productivity, business solutions or general tech-related improvement. \
    Be permissive: a wish to learn or explore AI counts even when the goal is still vague.";

/// Relevance prompt template. Replace `{primary_goal}` and `{tools}` before sending.
pub const RELEVANCE_PROMPT_TEMPLATE: &str = r#"A user answered two quiz questions:
1. What is your primary goal with using AI? Answer: '{primary_goal}'
2. What tools are in your current tech stack? Answer: '{tools}'

Using ONLY these answers, judge whether the user's intent is relevant to seeking information,
recommendations or solutions related to AI or technology. Goals about learning AI, exploring AI
tools, or applying AI for any purpose (personal, educational, business) are RELEVANT.
Only goals clearly unrelated to technology, such as a non-tech hobby, are IRRELEVANT.

Return a JSON object with this EXACT schema:
{
  "is_relevant": true,
  "reasoning": "concise explanation, mandatory when flagging as irrelevant"
}

Example (learning focus, RELEVANT):
Goal: "just trying to learn" / Tools: "none"
{"is_relevant": true, "reasoning": "The user wants to learn, which fits AI tool exploration."}

Example (business focus, RELEVANT):
Goal: "Improve customer support for my ecommerce site" / Tools: "Shopify, Zendesk"
{"is_relevant": true, "reasoning": "Clear business goal where AI can be applied."}

Example (IRRELEVANT):
Goal: "I want to bake a cake" / Tools: "oven, mixer"
{"is_relevant": false, "reasoning": "The goal is a non-tech hobby unrelated to AI or technology."}

Now assess the user's actual answers above."#;

/// System prompt for the recommendation generator.
pub const RECOMMENDATION_SYSTEM: &str = "You are an expert AI solutions architect with deep \
    knowledge of a wide range of AI tools and technologies. Analyze a user's goal, technical \
    background and current toolset, then recommend a tailored stack of AI tools. \
    Keep every recommendation practical and tied directly to the user's stated objective.";

/// Recommendation prompt template.
/// Replace: {primary_goal}, {tech_skill}, {tools}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r####"A user answered a short quiz:

1. **What is your primary goal with using AI?**
   Answer: '{primary_goal}'

2. **How tech-savvy are you?**
   Answer: '{tech_skill}'

3. **What tools are in your current tech stack?**
   Answer: '{tools}'

Based ONLY on this profile, write:

A. **Custom AI Tool Recommendations:** specific AI tools or platforms that help achieve the primary goal.
B. **Explanation for Each Tool:** what it does, the features that suit this goal and skill level,
   and how it fits with or complements the user's current tools.
C. **Practical Use Cases:** one or two short examples per tool showing how it moves the user toward the goal.

Return a JSON object with exactly ONE key, "ai_stack_summary", whose value is a single
well-formatted string (markdown is welcome) containing all of A, B and C:
{
  "ai_stack_summary": "### Your Custom AI Tool Stack\n\n**Goal:** ...\n\n**1. Tool Name**\n   - **Description:** ...\n   - **Key Features for You:** ...\n   - **Fit with Your Profile:** ...\n   - **Use Case Example:** ...\n\n[...more tools as appropriate...]"
}"####;

/// System prompt for the B2B lead qualifier.
pub const QUALIFICATION_SYSTEM: &str = "You are an astute business analyst. Evaluate whether a \
    user's stated goal suggests they could be a B2B client of an AI consulting and software \
    development firm. A B2B client owns or represents a business, OR wants custom software \
    (an MVP, a tool, an application) built.";

/// Qualification prompt template. Replace `{primary_goal}` before sending.
pub const QUALIFICATION_PROMPT_TEMPLATE: &str = r#"A user was asked: 'What is your primary goal with using AI?'
Answer: '{primary_goal}'

Using ONLY this answer, decide whether the user meets the B2B client criteria:
1. They intend to build or have software developed (an app, a SaaS product, an MVP, a custom tool).
OR
2. They represent a business and want to implement or integrate AI into its operations or products.

Learning about AI for personal use or general curiosity does NOT qualify unless it is explicitly
tied to a business or a software development goal.

Return a JSON object with this EXACT schema:
{"b2b_qualified": true}

Examples:
"I want to build an AI tool to automate my customer service emails." -> {"b2b_qualified": true}
"As a small business owner, I need to understand how AI can improve my marketing." -> {"b2b_qualified": true}
"I'm just trying to learn Python for AI." -> {"b2b_qualified": false}
"I want to use AI to make better paintings." -> {"b2b_qualified": false}

Now assess the user's actual answer above."#;

/// Fills `{name}` markers in a single pass, so answers that happen to contain
/// a marker are inserted verbatim instead of being expanded again.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = vars.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });

        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
