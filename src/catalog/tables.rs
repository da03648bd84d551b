//! Built-in configuration tables.
//!
//! Label order matters: position `i` of a crop's sequence is the label for
//! output index `i` of a network trained on that crop.

pub(super) const DEFAULT_CROP: &str = "tomato";

pub(super) const SUPPORTED_CROPS: &[&str] = &[
    "tomato",
    "potato",
    "corn",
    "rice",
    "wheat",
    "cotton",
    "apple",
    "grape",
    "pepper",
    "strawberry",
];

pub(super) const DISEASE_LABELS: &[(&str, &[&str])] = &[
    ("tomato", &[
        "Bacterial_spot",
        "Early_blight",
        "Late_blight",
        "Leaf_Mold",
        "Septoria_leaf_spot",
        "Spider_mites",
        "Target_Spot",
        "Yellow_Leaf_Curl_Virus",
        "Mosaic_virus",
        "Healthy",
    ]),
    ("potato", &[
        "Early_blight",
        "Late_blight",
        "Healthy",
    ]),
    ("corn", &[
        "Cercospora_leaf_spot",
        "Common_rust",
        "Northern_Leaf_Blight",
        "Healthy",
    ]),
    ("rice", &[
        "Bacterial_leaf_blight",
        "Brown_spot",
        "Leaf_smut",
        "Healthy",
    ]),
];

/// (label, description, treatment, prevention)
pub(super) const REMEDIATION: &[(&str, &str, &[&str], &[&str])] = &[
    (
        "Bacterial_spot",
        "Bacterial disease causing dark spots on leaves and fruits",
        &[
            "Remove and destroy infected plant parts",
            "Apply copper-based bactericides",
            "Improve air circulation",
            "Avoid overhead watering",
        ],
        &[
            "Use disease-free seeds",
            "Rotate crops",
            "Maintain proper plant spacing",
        ],
    ),
    (
        "Early_blight",
        "Fungal disease causing brown spots with concentric rings",
        &[
            "Apply fungicides containing chlorothalonil or mancozeb",
            "Remove infected leaves",
            "Mulch around plants",
        ],
        &[
            "Rotate crops annually",
            "Water at base of plants",
            "Ensure good drainage",
        ],
    ),
    (
        "Late_blight",
        "Serious fungal disease that can destroy entire crops",
        &[
            "Apply fungicides immediately",
            "Remove and destroy infected plants",
            "Improve air circulation",
        ],
        &[
            "Use resistant varieties",
            "Avoid overhead irrigation",
            "Monitor weather conditions",
        ],
    ),
    (
        "Healthy",
        "Plant appears healthy with no visible disease symptoms",
        &[
            "Continue regular monitoring",
            "Maintain good cultural practices",
        ],
        &[
            "Regular inspection",
            "Proper nutrition and watering",
            "Good sanitation practices",
        ],
    ),
];

pub(super) const SEVERITY_INFO: &[(&str, &str)] = &[
    ("low", "Minor infection, early intervention recommended"),
    ("medium", "Moderate infection, immediate treatment required"),
    ("high", "Severe infection, aggressive treatment necessary"),
    ("critical", "Critical infection, consider removing affected plants"),
];

pub(super) const UNKNOWN_DESCRIPTION: &str = "Disease information not available";
pub(super) const UNKNOWN_TREATMENT: &str = "Consult agricultural expert";
pub(super) const UNKNOWN_PREVENTION: &str = "Follow general crop management practices";
