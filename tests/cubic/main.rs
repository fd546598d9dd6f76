mod saturation;
