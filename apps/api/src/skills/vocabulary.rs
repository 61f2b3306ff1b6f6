//! Static skill vocabulary: topical patterns, reference dictionary,
//! normalization table and stop words.

use std::sync::LazyLock;

use regex::Regex;

/// Topical alternations, each compiled case-insensitively with word boundaries.
const PATTERN_GROUPS: &[&str] = &[
    // languages
    r"JavaScript|TypeScript|Python|Java|C\+\+|C#|Go|Rust|Swift|Kotlin|PHP|Ruby|Scala|R|MATLAB",
    // frameworks
    r"React|Vue|Angular|Svelte|Next\.js|Nuxt\.js|Express|FastAPI|Django|Flask|Spring|Laravel|Rails",
    // data formats and interfaces
    r"HTML|CSS|SQL|NoSQL|GraphQL|REST|SOAP|JSON|XML|YAML|Markdown",
    // databases
    r"MySQL|PostgreSQL|MongoDB|Redis|Cassandra|Elasticsearch|Oracle|SQL Server|SQLite",
    // cloud
    r"AWS|Azure|GCP|Google Cloud|AWS Lambda|EC2|S3|Azure Functions|Google Functions",
    // orchestration and CI
    r"Docker|Kubernetes|K8s|Jenkins|GitLab CI|GitHub Actions|Travis CI|CircleCI",
    // version control
    r"Git|SVN|Mercurial|Bitbucket|GitHub|GitLab|SourceTree",
    // methodology
    r"Agile|Scrum|Kanban|Waterfall|Lean|SAFe|XP|TDD|BDD",
    // machine learning and data
    r"Machine Learning|Deep Learning|AI|Data Science|Analytics|NLP|Computer Vision",
    r"TensorFlow|PyTorch|Keras|Scikit-learn|Pandas|NumPy|Jupyter|RStudio",
    // management
    r"Project Management|Product Management|Team Leadership|Stakeholder Management",
    // soft skills
    r"Communication|Presentation|Public Speaking|Negotiation|Facilitation",
    r"Problem Solving|Critical Thinking|Analytical Skills|Research|Decision Making",
    // architecture
    r"DevOps|Site Reliability|Microservices|Serverless|Cloud Native|Infrastructure",
    // operating systems and shells
    r"Linux|Windows|MacOS|Unix|Bash|PowerShell|Command Line|Terminal",
    // networking
    r"Network|TCP/IP|HTTP|HTTPS|DNS|Firewall|VPN|Load Balancer",
    // security
    r"Security|Cryptography|Penetration Testing|Vulnerability Assessment|Compliance",
    // testing
    r"Testing|QA|Quality Assurance|Unit Testing|Integration Testing|E2E Testing|Automation",
    r"Jest|Mocha|Chai|Cypress|Selenium|Playwright|Testing Library",
    // build tooling
    r"Webpack|Vite|Parcel|Rollup|Babel|ESLint|Prettier|npm|yarn|pnpm",
    // design
    r"UI|UX|User Interface|User Experience|Design|Figma|Sketch|Adobe XD|Photoshop",
    r"Bootstrap|Tailwind|Material UI|Ant Design|Chakra UI|Bulma|Foundation",
    // business software
    r"Salesforce|HubSpot|Marketo|Mailchimp|Google Analytics|Adobe Analytics",
    r"SAP|Oracle|NetSuite|QuickBooks|Xero|FreshBooks|Wave",
];

pub(crate) static SKILL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PATTERN_GROUPS
        .iter()
        .map(|group| Regex::new(&format!(r"(?i)\b(?:{group})\b")).expect("skill pattern is valid"))
        .collect()
});

/// Reference dictionary, matched as lowercase substrings of the whole text.
pub(crate) const COMMON_SKILLS: &[&str] = &[
    "JavaScript", "TypeScript", "React", "Vue.js", "Angular", "Node.js", "Python", "Java", "C++",
    "C#", "HTML", "CSS", "SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis", "Docker", "Kubernetes",
    "AWS", "Azure", "Google Cloud", "Git", "CI/CD", "Agile", "Scrum", "REST API", "GraphQL",
    "Microservices", "Machine Learning", "AI", "Data Science", "TensorFlow", "PyTorch",
    "Data Analysis", "Statistics", "Project Management", "Leadership", "Communication",
    "Problem Solving", "Team Work", "Critical Thinking", "DevOps", "Linux", "Windows", "MacOS",
    "Bash", "PowerShell", "Network", "Security", "Testing", "Unit Testing", "Integration Testing",
    "E2E Testing", "Jest", "Cypress", "Selenium", "Webpack", "Vite", "Express.js", "FastAPI",
    "Django", "Spring Boot", "Laravel", "Ruby on Rails", "PHP", "Go", "Rust", "Swift", "Kotlin",
    "Flutter", "React Native", "UI/UX", "Figma", "Adobe XD", "Sketch", "Photoshop",
];

/// Lowercase alias → canonical display form.
const NORMALIZATIONS: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("node", "Node.js"),
    ("reactjs", "React"),
    ("react.js", "React"),
    ("vuejs", "Vue.js"),
    ("angularjs", "Angular"),
    ("ml", "Machine Learning"),
    ("ai", "AI"),
    ("aws", "AWS"),
    ("gcp", "Google Cloud"),
    ("ci/cd", "CI/CD"),
    ("cicd", "CI/CD"),
    ("ui/ux", "UI/UX"),
    ("ux", "UX"),
    ("ui", "UI"),
];

/// Words that are never skills on their own: articles, auxiliaries, filler
/// qualifiers and duration nouns.
const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "in", "on", "at", "to", "for", "of", "with", "by", "as", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "must", "shall", "experience", "years",
    "year", "months", "month", "including", "such", "etc", "various", "multiple", "different",
    "several", "many", "strong", "excellent", "good", "solid", "deep", "extensive", "hands-on",
    "practical",
];

/// Maps a known alias to its canonical form; anything else passes through.
pub fn normalize_skill(skill: &str) -> String {
    let lowered = skill.to_lowercase();
    NORMALIZATIONS
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or_else(|| skill.to_string(), |(_, canonical)| canonical.to_string())
}

/// Validity test for free-form skill candidates.
pub fn is_valid_skill(skill: &str) -> bool {
    let lowered = skill.trim().to_lowercase();
    skill.chars().count() >= 2
        && !STOP_WORDS.contains(&lowered.as_str())
        && skill.chars().any(|c| c.is_ascii_alphabetic())
        && !skill.chars().all(|c| c.is_ascii_digit())
}
