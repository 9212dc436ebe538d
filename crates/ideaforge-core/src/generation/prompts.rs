use crate::models::Idea;

const ANY_CATEGORY: &str = "any innovative category";

/// Build the idea-generation prompt, optionally pinned to a category.
/// A blank category is treated as no category.
pub fn build_idea_prompt(category: Option<&str>) -> String {
    let category_line = match category.map(str::trim) {
        Some(c) if !c.is_empty() => format!("in the **{c}** category"),
        _ => format!("in {ANY_CATEGORY}"),
    };

    format!(
        r#"You are a seasoned startup founder and venture analyst.

Generate one unique, innovative and practical startup idea {category_line}.

The idea should:
- Solve a real, specific problem that people or businesses have today
- Have a clearly identifiable target market
- Be feasible to build with current technology
- Be described concretely, not as a vague trend

## Response Format

Return a JSON object with exactly these fields:

```json
{{
  "title": "Short, memorable name for the startup",
  "description": "Two or three sentences describing what the product does",
  "category": "The industry or category the idea belongs to",
  "targetMarket": "Who the customers are",
  "problem": "The specific problem being solved",
  "solution": "How the product solves that problem"
}}
```

Important:
- Every field is required and must be a non-empty string
- Return ONLY the raw JSON object. No prose, no explanation, no markdown formatting before or after it"#
    )
}

/// Build the evaluation prompt for one idea. Every idea field is embedded verbatim.
pub fn build_evaluation_prompt(idea: &Idea) -> String {
    format!(
        r#"You are an experienced venture capital analyst. Evaluate the following startup idea objectively.

## Startup Idea

- **Title:** {title}
- **Description:** {description}
- **Category:** {category}
- **Target Market:** {target_market}
- **Problem:** {problem}
- **Solution:** {solution}

## Criteria

Rate each criterion with an integer from 1 to 5:

- **marketSize** — 1 = tiny niche, 5 = very large addressable market
- **competition** — 1 = crowded market with dominant incumbents, 5 = little or no direct competition
- **feasibility** — 1 = needs breakthroughs or huge capital, 5 = buildable today by a small team
- **profitability** — 1 = unclear path to revenue, 5 = strong margins and clear business model
- **innovation** — 1 = copy of existing products, 5 = genuinely novel approach
- **timeToMarket** — 1 = years before launch, 5 = can launch within months

**overallScore** is an integer percentage from 0 to 100: a weighted aggregate of the six criteria reflecting your overall confidence in the idea.

Also provide:
- **strengths** — 3 to 5 short bullet strings
- **weaknesses** — 3 to 5 short bullet strings
- **recommendations** — 3 to 5 short, actionable bullet strings
- **marketAnalysis** — one paragraph on market size, trends and customers
- **riskAssessment** — one paragraph on the main risks and how to mitigate them

## Response Format

Return a JSON object with exactly these fields:

```json
{{
  "marketSize": 4,
  "competition": 3,
  "feasibility": 4,
  "profitability": 3,
  "innovation": 4,
  "timeToMarket": 3,
  "overallScore": 72,
  "strengths": ["Strength one", "Strength two", "Strength three"],
  "weaknesses": ["Weakness one", "Weakness two", "Weakness three"],
  "recommendations": ["Recommendation one", "Recommendation two", "Recommendation three"],
  "marketAnalysis": "Paragraph analysing the market",
  "riskAssessment": "Paragraph assessing the risks"
}}
```

Important:
- All six criteria and overallScore must be integers, not strings
- Return ONLY the raw JSON object. No prose, no explanation, no markdown formatting before or after it"#,
        title = idea.title,
        description = idea.description,
        category = idea.category,
        target_market = idea.target_market,
        problem = idea.problem,
        solution = idea.solution,
    )
}
